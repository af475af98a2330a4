use keyfall_schema::Seconds;
use thiserror::Error;

/// Reasons a session refuses to start.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no song selected")]
    NoSongSelected,

    #[error("song `{song_id}` has no notes")]
    EmptyTimeline { song_id: String },

    #[error("song `{song_id}`: note {index} has invalid onset {onset}")]
    InvalidOnset {
        song_id: String,
        index: usize,
        onset: Seconds,
    },

    #[error("song `{song_id}` has invalid duration {duration}")]
    InvalidDuration { song_id: String, duration: Seconds },

    #[error("failed to start countdown ticker")]
    Ticker(#[source] std::io::Error),
}
