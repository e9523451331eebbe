//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::Settings;
use crate::error::AppResult;
use crate::repositories::{FlatRepository, InMemoryFlatRepository, seed_demo_flats};
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since services and the store are shared via `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Direct access to the flat store, used by the health check
    pub flats: Arc<dyn FlatRepository>,
    /// Version reported by the health check
    pub version: String,
}

impl AppState {
    /// Creates the in-memory store, seeds it when configured, and wires the
    /// services on top of it.
    ///
    /// # Errors
    /// Fails when seeding fails or the configured notifier cannot be built.
    pub async fn new(settings: &Settings) -> AppResult<Self> {
        let flats: Arc<dyn FlatRepository> = Arc::new(InMemoryFlatRepository::new());
        if settings.booking.seed_demo_data {
            seed_demo_flats(flats.as_ref()).await?;
        }

        let services = Services::new(settings, flats.clone())?;
        Ok(Self::from_parts(
            services,
            flats,
            settings.application.version.clone(),
        ))
    }

    /// Assembles state from pre-built parts.
    pub fn from_parts(
        services: Services,
        flats: Arc<dyn FlatRepository>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            services,
            flats,
            version: version.into(),
        }
    }
}
