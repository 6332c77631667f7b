//! App Context

use std::{fmt, str::FromStr, sync::Arc};

use thiserror::Error;

use crate::{
    clock::{Clock, SystemClock},
    database::{self, Db},
    domain::{
        catalog::{CatalogService, PgCatalogService},
        drafts::{DraftStore, MEMORY_DRAFT_TTL, MemoryDraftStore, PgDraftStore},
        orders::{OrdersService, PgOrdersService},
        shop::{SessionShopService, ShopService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Where in-progress drafts are kept between requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DraftBackend {
    #[default]
    Postgres,

    /// Process-local; drafts are lost on restart and dropped after a day
    /// untouched.
    Memory,
}

#[derive(Debug, Error)]
#[error("unknown draft store: {0} (expected postgres or memory)")]
pub struct UnknownDraftBackend(String);

impl FromStr for DraftBackend {
    type Err = UnknownDraftBackend;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            _ => Err(UnknownDraftBackend(value.to_string())),
        }
    }
}

impl fmt::Display for DraftBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        })
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub orders: Arc<dyn OrdersService>,
    pub drafts: Arc<dyn DraftStore>,
    pub shop: Arc<dyn ShopService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        drafts: DraftBackend,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let drafts: Arc<dyn DraftStore> = match drafts {
            DraftBackend::Postgres => Arc::new(PgDraftStore::new(db.clone())),
            DraftBackend::Memory => {
                Arc::new(MemoryDraftStore::with_ttl(MEMORY_DRAFT_TTL, clock.clone()))
            }
        };

        Ok(Self::new(
            Arc::new(PgCatalogService::new(db.clone())),
            Arc::new(PgOrdersService::new(db, clock.clone())),
            drafts,
            clock,
        ))
    }

    /// Wire the shop over already-built services.
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        orders: Arc<dyn OrdersService>,
        drafts: Arc<dyn DraftStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let shop = SessionShopService::new(catalog.clone(), drafts.clone(), orders.clone(), clock);

        Self {
            catalog,
            orders,
            drafts,
            shop: Arc::new(shop),
        }
    }
}
