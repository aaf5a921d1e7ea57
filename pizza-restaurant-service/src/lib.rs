use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod db;
pub mod error;
pub mod handlers;
pub mod json;
pub mod models;
pub mod schema;
pub mod seed;
pub mod serializer;

pub use db::{establish_pool, run_migrations, DbPool};

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5555";

pub fn app(pool: DbPool) -> Router {
    handlers::router()
        .with_state(handlers::AppState { pool })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
