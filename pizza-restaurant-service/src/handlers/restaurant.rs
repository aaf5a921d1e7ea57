use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use diesel::prelude::*;
use tracing::{info, instrument};

use crate::db;
use crate::error::ApiError;
use crate::json::PrettyJson;
use crate::models::{Pizza, Restaurant, RestaurantPizza};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::serializer::*;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

/// Ids that are not integers can never match a row.
fn restaurant_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::RestaurantNotFound)
}

fn find_restaurant(conn: &mut SqliteConnection, id: i32) -> Result<Restaurant, ApiError> {
    restaurants::table
        .find(id)
        .select(Restaurant::as_select())
        .first(conn)
        .optional()?
        .ok_or(ApiError::RestaurantNotFound)
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "All restaurants, without their pizzas", body = [RestaurantSummary]),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<PrettyJson<Vec<RestaurantSummary>>, ApiError> {
    let results = db::interact(&state.pool, |conn| {
        Ok(restaurants::table
            .select(Restaurant::as_select())
            .order(restaurants::id.asc())
            .load(conn)?)
    })
    .await?;

    Ok(PrettyJson(results.iter().map(serialize_restaurant).collect()))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    params(
        ("id" = i32, Path, description = "Restaurant id")
    ),
    responses(
        (status = 200, description = "Restaurant with the pizzas it sells", body = RestaurantDetails),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<PrettyJson<RestaurantDetails>, ApiError> {
    let id = restaurant_id(path)?;

    let details = db::interact(&state.pool, move |conn| {
        let restaurant = find_restaurant(conn, id)?;
        let restaurant_pizzas = RestaurantPizza::belonging_to(&restaurant)
            .inner_join(pizzas::table)
            .select((RestaurantPizza::as_select(), Pizza::as_select()))
            .order(restaurant_pizzas::id.asc())
            .load::<(RestaurantPizza, Pizza)>(conn)?;

        Ok(serialize_restaurant_details(&restaurant, &restaurant_pizzas))
    })
    .await?;

    Ok(PrettyJson(details))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    params(
        ("id" = i32, Path, description = "Restaurant id")
    ),
    responses(
        (status = 204, description = "Restaurant and its pizza prices deleted"),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = restaurant_id(path)?;

    let removed = db::interact(&state.pool, move |conn| {
        conn.transaction::<_, ApiError, _>(|conn| {
            let restaurant = find_restaurant(conn, id)?;
            let removed = diesel::delete(
                restaurant_pizzas::table.filter(restaurant_pizzas::restaurant_id.eq(restaurant.id)),
            )
            .execute(conn)?;
            diesel::delete(&restaurant).execute(conn)?;
            Ok(removed)
        })
    })
    .await?;

    info!(restaurant_id = id, restaurant_pizzas = removed, "restaurant deleted");
    Ok(StatusCode::NO_CONTENT)
}
