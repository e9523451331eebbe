//! Small building blocks shared by the service and HTTP layers.

pub mod clock;
mod json;

pub use clock::{Clock, FixedClock, SystemClock};
pub use json::ApiJson;
