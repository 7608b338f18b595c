//! Database connection management.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::repositories::{CustomerRepository, CustomerSearchRepository, PhoneRepository};

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

/// Creates a PostgreSQL connection pool with the given configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
}

/// Handle to the customer store.
///
/// Owns the connection pool shared by every repository. Connections are
/// released when the store is closed or dropped.
#[derive(Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Wraps an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the database described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        Ok(Self::new(create_pool(config).await?))
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the tables and indexes if absent.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        crate::schema::ensure_schema(&self.pool).await
    }

    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.pool.clone())
    }

    pub fn phones(&self) -> PhoneRepository {
        PhoneRepository::new(self.pool.clone())
    }

    pub fn search(&self) -> CustomerSearchRepository {
        CustomerSearchRepository::new(self.pool.clone())
    }

    /// Closes all connections, waiting for checked-out ones to return.
    pub async fn close(self) {
        self.pool.close().await;
    }
}
