//! Shared test doubles for the Volley game backend.

mod clock;

pub use clock::{FixedClock, ManualClock};
