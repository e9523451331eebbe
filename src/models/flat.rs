use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::reservation::ReservationSlot;

/// Owner of one or more flats; receives pending and cancellation notices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landlord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Landlord {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// A rentable flat and the full history of its viewing reservations.
///
/// Two flats are equal when their ids are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flat {
    id: String,
    pub description: String,
    pub address: String,
    pub landlord: Landlord,
    reservations: Vec<ReservationSlot>,
}

impl Flat {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        address: impl Into<String>,
        landlord: Landlord,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            address: address.into(),
            landlord,
            reservations: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Reservations in the order they were requested.
    pub fn reservations(&self) -> &[ReservationSlot] {
        &self.reservations
    }

    pub fn reservation(&self, reservation_id: &str) -> Option<&ReservationSlot> {
        self.reservations.iter().find(|r| r.id == reservation_id)
    }

    pub fn reservation_mut(&mut self, reservation_id: &str) -> Option<&mut ReservationSlot> {
        self.reservations.iter_mut().find(|r| r.id == reservation_id)
    }

    /// Slots booked for exactly this timestamp, oldest first.
    pub fn reservations_at(&self, date_time: DateTime) -> impl Iterator<Item = &ReservationSlot> {
        self.reservations
            .iter()
            .filter(move |r| r.date_time == date_time)
    }

    /// Appends a slot; existing slots are never replaced or removed.
    pub fn add_reservation(&mut self, slot: ReservationSlot) {
        self.reservations.push(slot);
    }
}

impl PartialEq for Flat {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Flat {}

impl std::hash::Hash for Flat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
