//! Domain models for flats and their viewing reservations.

mod flat;
mod reservation;
mod rules;

pub use flat::{Flat, Landlord};
pub use reservation::{ReservationSlot, ReservationStatus, SlotRequest, format_slot_time};
pub use rules::BookingRules;
