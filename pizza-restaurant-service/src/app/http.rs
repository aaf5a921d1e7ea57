use std::env;

use pizza_restaurant_service::{app, establish_pool, run_migrations, DEFAULT_LISTEN_ADDR};
use tracing::info;

pub async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let pool = establish_pool()?;
    let migration_pool = pool.clone();
    tokio::task::spawn_blocking(move || run_migrations(&migration_pool)).await??;

    let addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Pizza restaurant service listening on {}", listener.local_addr()?);

    axum::serve(listener, app(pool)).await?;

    Ok(())
}
