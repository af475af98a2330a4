pub mod clock;
pub mod ticker;

pub use clock::{Clock, ManualClock, MonotonicClock, SessionClock};
pub use ticker::Ticker;
