pub mod judge;
pub mod result;
pub mod score;
pub mod session;
pub mod tracker;

pub use judge::{Judge, JudgeWindows, JudgmentResult};
pub use result::{RunId, SessionResult};
pub use score::{ScoreBoard, ScoreEvent, ScoreRules, ScoreState};
pub use session::{LastJudgment, Phase, Session};
pub use tracker::NoteTracker;
