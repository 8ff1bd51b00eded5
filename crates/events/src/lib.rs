//! Domain events and the in-process bus that fans them out.
//!
//! Quote submissions are the only facts published today; the notification
//! worker is the only consumer.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
