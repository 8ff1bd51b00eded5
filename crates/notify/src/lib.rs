//! New-quote notifications.
//!
//! A stored quote request is rendered into a short text message and sent to
//! the sales team's WhatsApp number. Delivery is best-effort: callers log
//! failures and move on.

pub mod error;
pub mod message;
pub mod notifier;
pub mod whatsapp;

pub use error::NotifyError;
pub use message::QuoteNotification;
pub use notifier::{LoggingNotifier, Notifier};
pub use whatsapp::{WhatsAppConfig, WhatsAppNotifier};
