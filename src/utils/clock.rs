//! Wall-clock access for booking-window checks.

use jiff::Zoned;
use jiff::civil::DateTime;

/// Source of the current local date-time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime;
}

/// Reads the system clock in the system time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime {
        Zoned::now().datetime()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime);

impl Clock for FixedClock {
    fn now(&self) -> DateTime {
        self.0
    }
}
