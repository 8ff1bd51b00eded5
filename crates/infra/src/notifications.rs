//! Background delivery of new-quote notifications.
//!
//! The worker owns a bus subscription and runs on the blocking pool. Each
//! `QuoteSubmitted` is rendered and handed to the notifier on the runtime
//! that spawned the worker. Delivery is best-effort: failures are logged and
//! the next message is processed.
//!
//! The loop ends once every publisher handle to the bus has been dropped.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use roofline_events::Subscription;
use roofline_notify::{LoggingNotifier, Notifier, QuoteNotification, WhatsAppNotifier};

use crate::config::NotificationsConfig;
use crate::submission::QuoteSubmittedEnvelope;

/// WhatsApp delivery when enabled, log lines otherwise.
pub fn build_notifier(cfg: &NotificationsConfig) -> Arc<dyn Notifier> {
    if cfg.enabled {
        info!(phone_number_id = %cfg.phone_number_id, "WhatsApp notifications enabled");
        Arc::new(WhatsAppNotifier::new(reqwest::Client::new(), cfg.whatsapp()))
    } else {
        info!("notifications disabled; new quotes are logged only");
        Arc::new(LoggingNotifier)
    }
}

/// Spawn the notification worker. Must be called from within a Tokio runtime.
pub fn spawn_notification_worker<N>(
    subscription: Subscription<QuoteSubmittedEnvelope>,
    notifier: Arc<N>,
) -> JoinHandle<()>
where
    N: Notifier + ?Sized + 'static,
{
    let handle = Handle::current();

    tokio::task::spawn_blocking(move || {
        info!("notification worker started");
        while let Ok(envelope) = subscription.recv() {
            deliver(&handle, notifier.as_ref(), &envelope);
        }
        info!("notification worker stopped: event bus closed");
    })
}

fn deliver<N>(handle: &Handle, notifier: &N, envelope: &QuoteSubmittedEnvelope)
where
    N: Notifier + ?Sized,
{
    let lead = &envelope.payload().lead;
    let notification = QuoteNotification::from_lead(lead);

    match handle.block_on(notifier.notify(&notification)) {
        Ok(()) => debug!(quote_id = %lead.id, event_id = %envelope.event_id(), "quote notification sent"),
        Err(e) => warn!(
            quote_id = %lead.id,
            event_id = %envelope.event_id(),
            error = %e,
            "quote notification failed"
        ),
    }
}
