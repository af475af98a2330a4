pub mod audio;
pub mod chart;
pub mod config;
pub mod error;
pub mod gameplay;
pub mod input;
pub mod runner;
pub mod time;

pub use chart::{HitTier, NoteStatus, Timeline};
pub use config::SessionConfig;
pub use error::EngineError;
pub use gameplay::{Phase, RunId, Session, SessionResult};
pub use runner::SessionRunner;
