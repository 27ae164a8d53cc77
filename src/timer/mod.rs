//! Countdown timer for timed variants.
//!
//! - [`Clock`]: monotonic time source ([`SystemClock`], [`ManualClock`])
//! - [`Countdown`]: one armed countdown, fires once
//! - [`TimerController`]: at most one countdown in flight, cancel-and-replace
//!
//! The controller never calls into the engine. The engine polls it and
//! turns an expiry into its own time-expired transition.

mod clock;
mod countdown;

pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::{Countdown, TimerController};
