//! Reservation request and response DTOs.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::models::SlotRequest;

/// Body of `POST /v1/flat/{flat_id}/reserve`.
///
/// `dateTime` is an ISO-8601 local date-time without offset. A missing or
/// null value is passed on to the booking rules, which refuse it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReserveRequest {
    #[serde(rename = "dateTime", default)]
    pub date_time: Option<DateTime>,
}

impl From<ReserveRequest> for SlotRequest {
    fn from(request: ReserveRequest) -> Self {
        SlotRequest {
            date_time: request.date_time,
        }
    }
}

/// Identifier of the reservation an operation acted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub id: String,
}

impl From<String> for ReservationResponse {
    fn from(id: String) -> Self {
        Self { id }
    }
}
