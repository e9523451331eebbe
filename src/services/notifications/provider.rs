//! Core notifier trait.
//!
//! The booking service tells landlords and tenants about reservation changes
//! through this seam. Delivery is best effort: an `Err` is logged by the
//! caller and never undoes the booking operation.

use crate::error::AppResult;
use async_trait::async_trait;

/// Trait for notification channels (log stub, webhook, ...)
///
/// # Example Implementation
/// ```ignore
/// use async_trait::async_trait;
///
/// pub struct SmsNotifier {
///     gateway: SmsGateway,
/// }
///
/// #[async_trait]
/// impl Notifier for SmsNotifier {
///     async fn send(&self, user_id: &str, message: &str) -> AppResult<()> {
///         self.gateway.text(user_id, message).await
///     }
///
///     fn name(&self) -> &'static str {
///         "sms"
///     }
/// }
/// ```
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `message` to the user identified by `user_id`
    async fn send(&self, user_id: &str, message: &str) -> AppResult<()>;

    /// Returns the notifier name for logging/debugging
    fn name(&self) -> &'static str;
}
