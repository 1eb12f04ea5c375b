use std::sync::Arc;

use pricegate_core::SystemClock;
use pricegate_infra::{InMemoryProductStore, ProductRepository};

use crate::config::ApiConfig;

/// Shared handles passed to every handler.
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<dyn ProductRepository>,
}

impl AppServices {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }
}

pub fn build_services(config: &ApiConfig) -> AppServices {
    let clock = Arc::new(SystemClock);
    let store = if config.seed_demo_catalog {
        InMemoryProductStore::with_demo_catalog(config.policy, clock)
    } else {
        InMemoryProductStore::new(config.policy, clock)
    };
    tracing::info!(
        seeded = config.seed_demo_catalog,
        pending_threshold = %config.policy.pending_threshold(),
        hard_cap = %config.policy.hard_cap(),
        "product store ready"
    );
    AppServices::new(Arc::new(store))
}
