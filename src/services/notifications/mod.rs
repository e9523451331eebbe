//! Notification system with pluggable notifiers.
//!
//! The core trait `Notifier` lets the booking service reach landlords and
//! tenants without knowing the delivery channel.

mod log_provider;
mod provider;
mod webhook_provider;

pub use log_provider::LogNotifier;
pub use provider::Notifier;
pub use webhook_provider::WebhookNotifier;

use std::sync::Arc;

use crate::config::settings::{NotificationSettings, NotifierKind};
use crate::error::AppResult;

/// Builds the notifier selected in configuration.
pub fn build_notifier(settings: &NotificationSettings) -> AppResult<Arc<dyn Notifier>> {
    let notifier: Arc<dyn Notifier> = match settings.provider {
        NotifierKind::Log => Arc::new(LogNotifier),
        NotifierKind::Webhook => Arc::new(WebhookNotifier::new(&settings.webhook)?),
    };
    tracing::info!(provider = notifier.name(), "Notifier configured");
    Ok(notifier)
}
