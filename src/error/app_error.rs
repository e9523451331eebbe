use thiserror::Error;

use crate::models::BookingRules;

/// Application-wide error type for the booking service and its HTTP surface.
///
/// Every variant renders to the caller as its `Display` text; the HTTP layer
/// maps all of them to `400 Bad Request` with a `{ "message": ... }` body.
#[derive(Error, Debug)]
pub enum AppError {
    /// No flat is stored under the requested identifier
    #[error("{flat_id} not found")]
    FlatNotFound { flat_id: String },

    /// The reservation is unknown, or cannot be acted on in its current state
    #[error("{message}")]
    ReservationNotFound { message: String },

    /// The requested timeslot breaks a booking-window or conflict rule
    #[error("{0}")]
    IllegalTimeslot(#[from] TimeslotViolation),

    /// The request could not be decoded
    #[error("{message}")]
    BadRequest { message: String },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("{source}")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Error for a flat id that the repository does not know.
    pub fn flat_not_found(flat_id: impl Into<String>) -> Self {
        AppError::FlatNotFound {
            flat_id: flat_id.into(),
        }
    }

    /// Error for a reservation id that the flat does not hold.
    pub fn reservation_not_found(reservation_id: &str) -> Self {
        AppError::ReservationNotFound {
            message: format!("{} not found", reservation_id),
        }
    }

    /// Error for approving a reservation the tenant already cancelled.
    pub fn reservation_cancelled() -> Self {
        AppError::ReservationNotFound {
            message: "You cannot approve this reservation, it has already been cancelled by tenant"
                .to_string(),
        }
    }

    /// Returns a short machine-readable name for the error kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::FlatNotFound { .. } => "flat_not_found",
            AppError::ReservationNotFound { .. } => "reservation_not_found",
            AppError::IllegalTimeslot(_) => "illegal_timeslot",
            AppError::BadRequest { .. } => "bad_request",
            AppError::Configuration { .. } => "configuration",
            AppError::Internal { .. } => "internal",
        }
    }
}

/// Reasons a requested viewing timeslot is refused.
///
/// Window variants carry the rule parameters so the message always matches
/// the rules the service was configured with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeslotViolation {
    #[error("Datetime cannot be null")]
    Missing,

    #[error("You cannot book time in past")]
    InPast,

    #[error("You can only book for the next {max_days_ahead} days")]
    TooFarAhead { max_days_ahead: i64 },

    #[error("You cannot book appointment for time less than {min_hours_ahead} hours")]
    TooSoon { min_hours_ahead: i64 },

    #[error("You can only book a timeslot of {slot_minutes} minutes")]
    OffGrid { slot_minutes: i8 },

    #[error("You can only book a timeslot between {first_hour:02}:00 and {closing_hour:02}:00")]
    OutsideViewingHours { first_hour: i8, closing_hour: i8 },

    #[error("You cannot book this timeslot, since it has reject been by the landlord")]
    RejectedByLandlord,

    #[error("You cannot book this timeslot, it has already been occupied by another tenant")]
    AlreadyOccupied,
}

impl TimeslotViolation {
    pub(crate) fn too_far_ahead(rules: &BookingRules) -> Self {
        TimeslotViolation::TooFarAhead {
            max_days_ahead: rules.max_days_ahead,
        }
    }

    pub(crate) fn too_soon(rules: &BookingRules) -> Self {
        TimeslotViolation::TooSoon {
            min_hours_ahead: rules.min_hours_ahead,
        }
    }

    pub(crate) fn off_grid(rules: &BookingRules) -> Self {
        TimeslotViolation::OffGrid {
            slot_minutes: rules.slot_minutes,
        }
    }

    pub(crate) fn outside_viewing_hours(rules: &BookingRules) -> Self {
        TimeslotViolation::OutsideViewingHours {
            first_hour: rules.first_viewing_hour,
            closing_hour: rules.last_viewing_hour + 1,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<crate::config::error::ConfigError> for AppError {
    fn from(error: crate::config::error::ConfigError) -> Self {
        let key = match &error {
            crate::config::error::ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::new(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
