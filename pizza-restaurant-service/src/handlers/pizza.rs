use axum::{extract::State, routing::get, Router};
use diesel::prelude::*;
use tracing::instrument;

use crate::db;
use crate::error::ApiError;
use crate::json::PrettyJson;
use crate::models::Pizza;
use crate::schema::pizzas;
use crate::serializer::{serialize_pizza, PizzaSummary};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "All pizzas", body = [PizzaSummary]),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(
    State(state): State<AppState>,
) -> Result<PrettyJson<Vec<PizzaSummary>>, ApiError> {
    let results = db::interact(&state.pool, |conn| {
        Ok(pizzas::table
            .select(Pizza::as_select())
            .order(pizzas::id.asc())
            .load(conn)?)
    })
    .await?;

    Ok(PrettyJson(results.iter().map(serialize_pizza).collect()))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::handlers::testing::{seeded_app, send, test_app};

    #[tokio::test]
    async fn test_list_pizzas() {
        let (app, _pool) = seeded_app();
        let (status, body) = send(&app, Method::GET, "/pizzas", None).await;

        assert_eq!(status, StatusCode::OK);
        let pizzas = body.as_array().unwrap();
        assert_eq!(pizzas.len(), 3);
        assert_eq!(pizzas[0]["name"], "Emma");
        assert_eq!(pizzas[0]["ingredients"], "Dough, Tomato Sauce, Cheese");
        for pizza in pizzas {
            assert_eq!(pizza.as_object().unwrap().len(), 3);
            assert!(pizza.get("restaurant_pizzas").is_none());
        }
    }

    #[tokio::test]
    async fn test_list_pizzas_empty() {
        let (app, _pool) = test_app();
        let (status, body) = send(&app, Method::GET, "/pizzas", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}
