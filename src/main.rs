//! Server binary: loads config, prepares the database, mounts the router and listens.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use usuarios_api::{app, ensure_database_exists, ensure_users_table, AppConfig, AppState, PgUserStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("usuarios_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    ensure_users_table(&pool, &config.schema).await?;

    let state = AppState::new(PgUserStore::new(pool, config.schema.clone()));
    let router = app(state, config.body_limit);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
