use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a viewing reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Rejected,
    Canceled,
}

impl ReservationStatus {
    /// Pending and approved slots take the timeslot away from other tenants.
    pub fn is_occupied(self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Approved)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Approved => "APPROVED",
            ReservationStatus::Rejected => "REJECTED",
            ReservationStatus::Canceled => "CANCELED",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single viewing appointment held by a flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationSlot {
    pub id: String,
    pub date_time: DateTime,
    pub tenant_id: String,
    pub status: ReservationStatus,
}

impl ReservationSlot {
    /// Creates a fresh pending slot with a generated id.
    ///
    /// The timestamp is truncated to the minute.
    pub fn pending(date_time: DateTime, tenant_id: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date_time: truncate_to_minute(date_time),
            tenant_id: tenant_id.into(),
            status: ReservationStatus::Pending,
        }
    }
}

/// A tenant's request for a timeslot, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotRequest {
    pub date_time: Option<DateTime>,
}

impl SlotRequest {
    pub fn at(date_time: DateTime) -> Self {
        Self {
            date_time: Some(date_time),
        }
    }
}

/// Drops seconds and sub-second precision.
fn truncate_to_minute(date_time: DateTime) -> DateTime {
    date_time
        .date()
        .at(date_time.hour(), date_time.minute(), 0, 0)
}

/// Renders a slot timestamp as `YYYY-MM-DDTHH:MM:SS`.
pub fn format_slot_time(date_time: DateTime) -> String {
    date_time.strftime("%Y-%m-%dT%H:%M:%S").to_string()
}
