//! Service wiring: picks Postgres or in-memory adapters from configuration
//! and starts the notification worker.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use roofline_catalog::{BlogRepository, LocationRepository, PricingRepository};
use roofline_events::{EventBus, InMemoryEventBus};
use roofline_infra::config::AppConfig;
use roofline_infra::{
    InMemoryCatalog, InMemoryQuoteStore, PostgresCatalog, PostgresQuoteStore, QuoteStore,
    QuoteSubmittedEnvelope, QuoteSubmitter, build_notifier, db, spawn_notification_worker,
};
use roofline_notify::Notifier;
use roofline_quotes::{CalculatorSettings, QuoteCalculator};

pub type SharedPricing = Arc<dyn PricingRepository>;
pub type SharedQuoteStore = Arc<dyn QuoteStore>;
pub type SharedBus = Arc<InMemoryEventBus<QuoteSubmittedEnvelope>>;

/// Everything the route handlers need, shared behind an `Arc`.
pub struct AppServices {
    pub calculator: Arc<QuoteCalculator<SharedPricing>>,
    pub submitter: QuoteSubmitter<SharedPricing, SharedQuoteStore, SharedBus>,
    pub locations: Arc<dyn LocationRepository>,
    pub blog: Arc<dyn BlogRepository>,
    pub quotes: SharedQuoteStore,
}

/// Repositories the services are assembled from.
pub struct Adapters {
    pub pricing: SharedPricing,
    pub locations: Arc<dyn LocationRepository>,
    pub blog: Arc<dyn BlogRepository>,
    pub quotes: SharedQuoteStore,
}

impl Adapters {
    /// Seeded in-memory catalog and an empty quote store.
    pub fn in_memory() -> Self {
        Self::from_catalog(Arc::new(InMemoryCatalog::seeded()))
    }

    pub fn from_catalog(catalog: Arc<InMemoryCatalog>) -> Self {
        Self {
            pricing: catalog.clone(),
            locations: catalog.clone(),
            blog: catalog,
            quotes: Arc::new(InMemoryQuoteStore::new()),
        }
    }
}

impl AppServices {
    /// Assemble services and start the notification worker.
    ///
    /// Must be called inside a Tokio runtime. The worker stops once the
    /// returned services (and so the bus) are dropped.
    pub fn start(
        adapters: Adapters,
        settings: CalculatorSettings,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let bus: SharedBus = Arc::new(InMemoryEventBus::new());
        spawn_notification_worker(bus.subscribe(), notifier);

        let calculator = Arc::new(QuoteCalculator::with_settings(adapters.pricing, settings));
        let submitter = QuoteSubmitter::new(calculator.clone(), adapters.quotes.clone(), bus);

        Self {
            calculator,
            submitter,
            locations: adapters.locations,
            blog: adapters.blog,
            quotes: adapters.quotes,
        }
    }
}

/// Build services from configuration: Postgres when `database.url` is set,
/// seeded in-memory data otherwise.
pub async fn build_services(cfg: &AppConfig) -> anyhow::Result<AppServices> {
    let adapters = match db::connect(&cfg.database).await? {
        Some(pool) => {
            db::apply_schema(&pool)
                .await
                .context("database schema bootstrap failed")?;
            let catalog = Arc::new(PostgresCatalog::new(pool.clone()));
            Adapters {
                pricing: catalog.clone(),
                locations: catalog.clone(),
                blog: catalog,
                quotes: Arc::new(PostgresQuoteStore::new(pool)),
            }
        }
        None => {
            info!("no database configured; using seeded in-memory catalog");
            Adapters::in_memory()
        }
    };

    let notifier = build_notifier(&cfg.notifications);

    Ok(AppServices::start(
        adapters,
        cfg.pricing.calculator_settings(),
        notifier,
    ))
}
