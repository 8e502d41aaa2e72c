//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::feed::GiftFeed;
use crate::registry::AvailabilityProjection;
use crate::registry::checkin::{CheckinFlow, PgRegistryStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to shared
/// resources: the database pool, the gift feed, and the availability
/// projection.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    feed: GiftFeed,
    projection: Arc<RwLock<AvailabilityProjection>>,
    checkin_flow: CheckinFlow<PgRegistryStore>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let feed = GiftFeed::new();
        let projection = Arc::new(RwLock::new(AvailabilityProjection::new()));
        let checkin_flow = CheckinFlow::new(PgRegistryStore::new(pool.clone()));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                feed,
                projection,
                checkin_flow,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the gift change feed.
    #[must_use]
    pub fn feed(&self) -> &GiftFeed {
        &self.inner.feed
    }

    /// Get a handle to the shared availability projection.
    #[must_use]
    pub fn projection(&self) -> Arc<RwLock<AvailabilityProjection>> {
        Arc::clone(&self.inner.projection)
    }

    /// Get a reference to the reservation submission flow.
    #[must_use]
    pub fn checkin_flow(&self) -> &CheckinFlow<PgRegistryStore> {
        &self.inner.checkin_flow
    }
}
