use sqlx::PgPool;

use registrar_config::{CorsConfig, DatabaseConfig, JwtConfig};
use registrar_db::init_db_pool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// Builds state around an existing pool; integration tests use this with
    /// the pool handed out by `#[sqlx::test]`.
    pub fn with_pool(db: PgPool) -> Self {
        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
        }
    }
}

pub async fn init_app_state() -> AppState {
    let db = init_db_pool(&DatabaseConfig::from_env()).await;
    AppState::with_pool(db)
}
