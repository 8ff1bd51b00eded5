use async_trait::async_trait;
use tracing::info;

use crate::error::NotifyError;
use crate::message::QuoteNotification;

/// Delivers new-quote notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &QuoteNotification) -> Result<(), NotifyError>;
}

#[async_trait]
impl<N> Notifier for std::sync::Arc<N>
where
    N: Notifier + ?Sized,
{
    async fn notify(&self, notification: &QuoteNotification) -> Result<(), NotifyError> {
        (**self).notify(notification).await
    }
}

/// Writes the notification to the log instead of sending it.
///
/// Used when notifications are disabled in configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotifier;

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn notify(&self, notification: &QuoteNotification) -> Result<(), NotifyError> {
        info!(
            customer = %notification.customer_name,
            city = %notification.city,
            product = %notification.product,
            total_cash = %notification.total_cash,
            "new quote (notifications disabled)"
        );
        Ok(())
    }
}
