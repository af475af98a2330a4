use keyfall_schema::{Pitch, Seconds};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    /// Host clock time when the key changed state
    pub timestamp: Seconds,
    pub pitch: Pitch,
    pub pressed: bool,
}

impl InputEvent {
    pub fn press(pitch: Pitch, timestamp: Seconds) -> Self {
        Self {
            timestamp,
            pitch,
            pressed: true,
        }
    }

    pub fn release(pitch: Pitch, timestamp: Seconds) -> Self {
        Self {
            timestamp,
            pitch,
            pressed: false,
        }
    }
}
