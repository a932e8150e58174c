use dotenvy::dotenv;
use tracing::{info, warn};

use registrar::logging::init_tracing;
use registrar::metrics::{init_metrics, metrics_app};
use registrar::router::init_router;
use registrar::state::init_app_state;
use registrar_config::ServerConfig;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let state = init_app_state().await;

    sqlx::migrate!("./migrations")
        .run(&state.db)
        .await
        .expect("Failed to run database migrations");

    let mut app = init_router(state);

    match init_metrics() {
        Ok(Some(handle)) => app = app.merge(metrics_app(handle)),
        Ok(None) => info!("Observability disabled, /metrics not mounted"),
        Err(e) => warn!(error = %e, "Failed to install Prometheus recorder"),
    }

    let config = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(config.address())
        .await
        .expect("Failed to bind server address");

    info!(address = %config.address(), "🚀 Server running");
    info!("📚 Swagger UI available at /swagger-ui");
    info!("📖 Scalar UI available at /scalar");

    axum::serve(listener, app).await.expect("Server error");
}
