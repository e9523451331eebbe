//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `reservation` - Reserve request and reservation id response
//! - `health` - Health check response
//! - `error` - Common error response

mod error;
mod health;
mod reservation;

pub use error::ErrorResponse;
pub use health::{HealthResponse, HealthStatus};
pub use reservation::{ReservationResponse, ReserveRequest};
