//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod booking_service;
mod flat_locks;
pub mod identity;
pub mod notifications;

pub use booking_service::BookingService;
pub use flat_locks::{FlatGuard, FlatLocks};
pub use identity::{FixedIdentityProvider, IdentityProvider};
pub use notifications::{LogNotifier, Notifier, WebhookNotifier, build_notifier};

use std::sync::Arc;

use crate::config::Settings;
use crate::error::AppResult;
use crate::repositories::FlatRepository;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since every service shares its collaborators via `Arc`.
#[derive(Clone)]
pub struct Services {
    pub booking: BookingService,
}

impl Services {
    /// Wires the services described by `settings` on top of a flat store.
    ///
    /// # Errors
    /// Fails when the configured notifier cannot be built.
    pub fn new(settings: &Settings, flats: Arc<dyn FlatRepository>) -> AppResult<Self> {
        let notifier = build_notifier(&settings.notifications)?;
        let identity = FixedIdentityProvider::new(settings.booking.tenant_placeholder.clone());

        let booking = BookingService::new(flats, notifier)
            .with_identity(Arc::new(identity))
            .with_rules(settings.booking.rules())
            .with_flat_locks(settings.booking.serialize_per_flat);

        Ok(Self { booking })
    }
}
