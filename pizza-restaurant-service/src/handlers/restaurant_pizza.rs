use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use diesel::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use crate::db;
use crate::error::ApiError;
use crate::json::PrettyJson;
use crate::models::{NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::serializer::*;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Price between 1 and 30, inclusive
    pub price: Option<i64>,
    #[schema(value_type = Option<i32>)]
    pub pizza_id: Option<Value>,
    #[schema(value_type = Option<i32>)]
    pub restaurant_id: Option<Value>,
}

/// Anything that is not an integer in row id range cannot name a row.
fn row_id(value: Option<&Value>) -> Option<i32> {
    value
        .and_then(Value::as_i64)
        .and_then(|id| i32::try_from(id).ok())
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Restaurant pizza created", body = RestaurantPizzaDetails),
        (status = 400, description = "Invalid price, or unknown pizza or restaurant", body = ErrorsResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantPizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, PrettyJson<RestaurantPizzaDetails>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!(%rejection, "unreadable restaurant pizza payload");
        ApiError::ValidationFailed
    })?;

    let price = payload
        .price
        .filter(|&price| RestaurantPizza::is_valid_price(price))
        .and_then(|price| i32::try_from(price).ok())
        .ok_or(ApiError::ValidationFailed)?;

    let (Some(pizza_id), Some(restaurant_id)) = (
        row_id(payload.pizza_id.as_ref()),
        row_id(payload.restaurant_id.as_ref()),
    ) else {
        return Err(ApiError::InvalidReference);
    };

    let details = db::interact(&state.pool, move |conn| {
        let pizza = pizzas::table
            .find(pizza_id)
            .select(Pizza::as_select())
            .first(conn)
            .optional()?;
        let restaurant = restaurants::table
            .find(restaurant_id)
            .select(Restaurant::as_select())
            .first(conn)
            .optional()?;
        let (Some(pizza), Some(restaurant)) = (pizza, restaurant) else {
            return Err(ApiError::InvalidReference);
        };

        let restaurant_pizza = diesel::insert_into(restaurant_pizzas::table)
            .values(&NewRestaurantPizza {
                price,
                pizza_id: pizza.id,
                restaurant_id: restaurant.id,
            })
            .returning(RestaurantPizza::as_returning())
            .get_result(conn)?;

        Ok(serialize_restaurant_pizza_details(
            &restaurant_pizza,
            &pizza,
            &restaurant,
        ))
    })
    .await?;

    info!(
        id = details.id,
        pizza_id = details.pizza_id,
        restaurant_id = details.restaurant_id,
        "restaurant pizza created"
    );
    Ok((StatusCode::CREATED, PrettyJson(details)))
}
