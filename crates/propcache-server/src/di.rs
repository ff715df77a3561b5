//! Dependency wiring.
//!
//! Builds every component once at startup and hands out `Arc`s. The snapshot
//! invalidator is subscribed to the record store here, before any request
//! can write.

use propcache_config::{AppConfig, CacheConfig};
use propcache_core::PropcacheResult;
use propcache_repository::{
    create_pool, DatabasePoolInterface, InMemoryListingRepository, ListingRepository,
    MySqlListingRepository,
};
use propcache_rest::AppState;
use propcache_service::{
    create_redis_pool, CacheInterface, InMemoryCacheService, ListingSeeder, ListingService,
    ListingServiceImpl, MetricsReporter, RedisCacheService, ResponseCache, SnapshotCache,
    SnapshotInvalidator,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Fully wired application components.
pub struct AppModule {
    pub repository: Arc<dyn ListingRepository>,
    pub database: Option<Arc<dyn DatabasePoolInterface>>,
    pub cache: Arc<dyn CacheInterface>,
    pub snapshot: Arc<SnapshotCache>,
    pub listing_service: Arc<dyn ListingService>,
    pub response_cache: Arc<ResponseCache>,
    pub metrics_reporter: Arc<MetricsReporter>,
}

impl AppModule {
    /// Builds the REST application state.
    pub fn app_state(&self) -> AppState {
        let state = AppState::new(
            self.listing_service.clone(),
            self.metrics_reporter.clone(),
            self.response_cache.clone(),
            self.cache.clone(),
        );
        match &self.database {
            Some(pool) => state.with_database(pool.clone()),
            None => state,
        }
    }

    /// Builds a seeder over the same store and snapshot.
    pub fn seeder(&self) -> ListingSeeder {
        ListingSeeder::new(self.repository.clone(), self.snapshot.clone())
    }

    /// Releases pooled connections.
    pub async fn shutdown(&self) {
        if let Some(pool) = &self.database {
            pool.close().await;
        }
    }
}

/// Assembles an [`AppModule`] from already-connected backends.
pub struct AppModuleBuilder {
    cache_config: CacheConfig,
    database: Option<Arc<dyn DatabasePoolInterface>>,
    cache: Option<Arc<dyn CacheInterface>>,
}

impl AppModuleBuilder {
    /// Creates a builder with the given cache lifetimes.
    pub fn new(cache_config: CacheConfig) -> Self {
        Self {
            cache_config,
            database: None,
            cache: None,
        }
    }

    /// Uses MySQL as the record store.
    pub fn with_database_pool(mut self, pool: Arc<dyn DatabasePoolInterface>) -> Self {
        self.database = Some(pool);
        self
    }

    /// Uses the given cache backend.
    pub fn with_cache(mut self, cache: Arc<dyn CacheInterface>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Wires the components. Missing backends fall back to in-memory ones.
    pub fn build(self) -> AppModule {
        let repository: Arc<dyn ListingRepository> = match &self.database {
            Some(pool) => Arc::new(MySqlListingRepository::new(pool.clone())),
            None => Arc::new(InMemoryListingRepository::new()),
        };
        let cache: Arc<dyn CacheInterface> = self
            .cache
            .unwrap_or_else(|| Arc::new(InMemoryCacheService::new()));

        repository.subscribe(Arc::new(SnapshotInvalidator::new(cache.clone())));

        let snapshot = Arc::new(SnapshotCache::new(
            cache.clone(),
            repository.clone(),
            self.cache_config.snapshot_ttl(),
        ));
        let listing_service: Arc<dyn ListingService> = Arc::new(ListingServiceImpl::new(
            repository.clone(),
            snapshot.clone(),
        ));

        info!(
            store = if self.database.is_some() { "mysql" } else { "memory" },
            cache = cache.backend(),
            "Application module built"
        );

        AppModule {
            repository,
            database: self.database,
            response_cache: Arc::new(ResponseCache::new(
                cache.clone(),
                self.cache_config.response_ttl(),
            )),
            metrics_reporter: Arc::new(MetricsReporter::new(cache.clone())),
            cache,
            snapshot,
            listing_service,
        }
    }
}

/// Connects the configured backends and builds the module.
pub async fn build_module(config: &AppConfig) -> PropcacheResult<AppModule> {
    let mut builder = AppModuleBuilder::new(config.cache.clone());

    if config.database.enabled {
        let pool = create_pool(&config.database).await?;
        if config.database.run_migrations {
            pool.run_migrations().await?;
        }
        builder = builder.with_database_pool(pool);
    } else {
        warn!("Database disabled, using the in-memory record store");
    }

    if config.redis.enabled {
        let pool = create_redis_pool(&config.redis)?;
        builder = builder.with_cache(Arc::new(RedisCacheService::new(
            Arc::new(pool),
            config.cache.operation_timeout(),
        )));
    } else {
        warn!("Redis disabled, using the in-process cache");
    }

    Ok(builder.build())
}
