//! Seams injected into every component.

pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};
