use crossbeam_channel::{unbounded, Receiver, Sender};
use keyfall_schema::Pitch;

/// Fire-and-forget sound output. The engine never reads anything back.
pub trait AudioSink {
    fn play_pitch(&self, pitch: Pitch);
}

/// Discards every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_pitch(&self, _pitch: Pitch) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    PlayPitch { pitch: Pitch },
}

/// Sending half used by the engine; the synthesizer drains the receiver on
/// its own thread.
#[derive(Clone)]
pub struct AudioHandle {
    command_tx: Sender<AudioCommand>,
}

impl AudioHandle {
    pub fn channel() -> (Self, Receiver<AudioCommand>) {
        let (tx, rx) = unbounded();
        (Self { command_tx: tx }, rx)
    }
}

impl AudioSink for AudioHandle {
    fn play_pitch(&self, pitch: Pitch) {
        let _ = self.command_tx.send(AudioCommand::PlayPitch { pitch });
    }
}

impl<A: AudioSink + ?Sized> AudioSink for &A {
    fn play_pitch(&self, pitch: Pitch) {
        (**self).play_pitch(pitch)
    }
}
