//! # Registrar DB
//!
//! PostgreSQL connection pool initialization.
//!
//! # Example
//!
//! ```ignore
//! use registrar_config::DatabaseConfig;
//! use registrar_db::init_db_pool;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = init_db_pool(&DatabaseConfig::from_env()).await;
//! }
//! ```

use registrar_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// Initializes a PostgreSQL connection pool from `config`.
///
/// # Panics
///
/// Panics if the database cannot be reached.
pub async fn init_db_pool(config: &DatabaseConfig) -> PgPool {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
        .expect("Failed to connect to database");

    info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    pool
}

pub use sqlx::PgPool;
