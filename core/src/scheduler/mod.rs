pub mod clock;
pub mod frame;
pub mod lines;

pub use clock::MonotonicClock;
pub use frame::{FrameScheduler, TickOutcome};
pub use lines::{LineAssembler, MAX_PENDING_BYTES};
