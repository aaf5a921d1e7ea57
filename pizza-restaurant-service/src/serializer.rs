//! Response projections.
//!
//! Each route serializes exactly one of these shapes. Relations are nested in
//! one direction only, so a restaurant's associations never point back at the
//! restaurant and a nested pizza never lists its associations. Fields are
//! declared in alphabetical order to keep the JSON key order stable.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models;

/// Restaurant without its associations.
#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct RestaurantSummary {
    pub address: String,
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct PizzaSummary {
    pub id: i32,
    pub ingredients: String,
    pub name: String,
}

/// Association as listed under its restaurant.
#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct RestaurantPizzaEntry {
    pub id: i32,
    pub pizza: PizzaSummary,
    pub pizza_id: i32,
    pub price: i32,
    pub restaurant_id: i32,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct RestaurantDetails {
    pub address: String,
    pub id: i32,
    pub name: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaEntry>,
}

/// Association with both of its parents expanded.
#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct RestaurantPizzaDetails {
    pub id: i32,
    pub pizza: PizzaSummary,
    pub pizza_id: i32,
    pub price: i32,
    pub restaurant: RestaurantSummary,
    pub restaurant_id: i32,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct ErrorsResponse {
    pub errors: Vec<String>,
}

pub fn serialize_restaurant(restaurant: &models::Restaurant) -> RestaurantSummary {
    RestaurantSummary {
        address: restaurant.address.clone(),
        id: restaurant.id,
        name: restaurant.name.clone(),
    }
}

pub fn serialize_pizza(pizza: &models::Pizza) -> PizzaSummary {
    PizzaSummary {
        id: pizza.id,
        ingredients: pizza.ingredients.clone(),
        name: pizza.name.clone(),
    }
}

pub fn serialize_restaurant_details(
    restaurant: &models::Restaurant,
    restaurant_pizzas: &[(models::RestaurantPizza, models::Pizza)],
) -> RestaurantDetails {
    RestaurantDetails {
        address: restaurant.address.clone(),
        id: restaurant.id,
        name: restaurant.name.clone(),
        restaurant_pizzas: restaurant_pizzas
            .iter()
            .map(|(rp, pizza)| RestaurantPizzaEntry {
                id: rp.id,
                pizza: serialize_pizza(pizza),
                pizza_id: rp.pizza_id,
                price: rp.price,
                restaurant_id: rp.restaurant_id,
            })
            .collect(),
    }
}

pub fn serialize_restaurant_pizza_details(
    restaurant_pizza: &models::RestaurantPizza,
    pizza: &models::Pizza,
    restaurant: &models::Restaurant,
) -> RestaurantPizzaDetails {
    RestaurantPizzaDetails {
        id: restaurant_pizza.id,
        pizza: serialize_pizza(pizza),
        pizza_id: restaurant_pizza.pizza_id,
        price: restaurant_pizza.price,
        restaurant: serialize_restaurant(restaurant),
        restaurant_id: restaurant_pizza.restaurant_id,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn restaurant() -> models::Restaurant {
        models::Restaurant {
            id: 3,
            name: "Kiki's Pizza".to_string(),
            address: "address3".to_string(),
        }
    }

    fn pizza() -> models::Pizza {
        models::Pizza {
            id: 1,
            name: "Emma".to_string(),
            ingredients: "Dough, Tomato Sauce, Cheese".to_string(),
        }
    }

    fn restaurant_pizza() -> models::RestaurantPizza {
        models::RestaurantPizza {
            id: 7,
            price: 12,
            pizza_id: 1,
            restaurant_id: 3,
        }
    }

    #[test]
    fn test_restaurant_summary_has_no_associations() {
        let value = serde_json::to_value(serialize_restaurant(&restaurant())).unwrap();
        assert_eq!(
            value,
            json!({ "address": "address3", "id": 3, "name": "Kiki's Pizza" })
        );
    }

    #[test]
    fn test_restaurant_details_omit_back_reference() {
        let value = serde_json::to_value(serialize_restaurant_details(
            &restaurant(),
            &[(restaurant_pizza(), pizza())],
        ))
        .unwrap();

        let entry = &value["restaurant_pizzas"][0];
        assert_eq!(entry["price"], 12);
        assert_eq!(entry["pizza"]["name"], "Emma");
        assert!(entry.get("restaurant").is_none());
        assert!(entry["pizza"].get("restaurant_pizzas").is_none());
    }

    #[test]
    fn test_restaurant_pizza_details_expand_both_parents() {
        let value = serde_json::to_value(serialize_restaurant_pizza_details(
            &restaurant_pizza(),
            &pizza(),
            &restaurant(),
        ))
        .unwrap();

        assert_eq!(
            value,
            json!({
                "id": 7,
                "pizza": { "id": 1, "ingredients": "Dough, Tomato Sauce, Cheese", "name": "Emma" },
                "pizza_id": 1,
                "price": 12,
                "restaurant": { "address": "address3", "id": 3, "name": "Kiki's Pizza" },
                "restaurant_id": 3,
            })
        );
        assert!(value["restaurant"].get("restaurant_pizzas").is_none());
    }

    #[test]
    fn test_keys_are_alphabetical() {
        let text = serde_json::to_string(&serialize_pizza(&pizza())).unwrap();
        let keys: Vec<String> = match serde_json::from_str::<Value>(&text).unwrap() {
            Value::Object(map) => map.keys().cloned().collect(),
            _ => unreachable!(),
        };
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| text.find(&format!("\"{k}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
