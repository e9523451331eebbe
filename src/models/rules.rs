use jiff::SignedDuration;

/// Booking-window and timeslot grid parameters.
///
/// The defaults describe 20-minute viewings between 10:00 and 20:00, booked
/// at least 24 hours and less than 7 days in advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRules {
    /// Requests at or beyond this many days ahead are refused
    pub max_days_ahead: i64,
    /// Requests fewer than this many hours ahead are refused
    pub min_hours_ahead: i64,
    /// Slot length; the minute component must be a multiple of it
    pub slot_minutes: i8,
    /// First hour a viewing may start
    pub first_viewing_hour: i8,
    /// Last hour a viewing may start
    pub last_viewing_hour: i8,
}

impl BookingRules {
    pub fn max_lead_time(&self) -> SignedDuration {
        SignedDuration::from_hours(self.max_days_ahead * 24)
    }

    pub fn min_lead_time(&self) -> SignedDuration {
        SignedDuration::from_hours(self.min_hours_ahead)
    }

    pub fn is_on_grid(&self, minute: i8) -> bool {
        minute % self.slot_minutes == 0
    }

    pub fn is_viewing_hour(&self, hour: i8) -> bool {
        (self.first_viewing_hour..=self.last_viewing_hour).contains(&hour)
    }
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            max_days_ahead: 7,
            min_hours_ahead: 24,
            slot_minutes: 20,
            first_viewing_hour: 10,
            last_viewing_hour: 19,
        }
    }
}
