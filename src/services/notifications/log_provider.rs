use async_trait::async_trait;

use super::provider::Notifier;
use crate::error::AppResult;

/// Notifier that only writes the message to the application log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, user_id: &str, message: &str) -> AppResult<()> {
        tracing::info!(user_id = %user_id, "{} sent to userId: {}", message, user_id);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
