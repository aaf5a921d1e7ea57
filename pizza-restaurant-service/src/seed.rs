use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::models::{NewPizza, NewRestaurant, NewRestaurantPizza};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

const RESTAURANTS: [(&str, &str); 3] = [
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: [(&str, &str); 3] = [
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// (restaurant index, pizza index, price)
const RESTAURANT_PIZZAS: [(usize, usize, i32); 3] = [(0, 0, 1), (1, 1, 4), (2, 2, 5)];

/// Replaces every row with the sample data set.
pub fn seed(conn: &mut SqliteConnection) -> QueryResult<()> {
    conn.transaction(|conn| {
        info!("Clearing db...");
        diesel::delete(restaurant_pizzas::table).execute(conn)?;
        diesel::delete(pizzas::table).execute(conn)?;
        diesel::delete(restaurants::table).execute(conn)?;

        info!("Creating restaurants...");
        let restaurant_ids = RESTAURANTS
            .iter()
            .map(|&(name, address)| {
                diesel::insert_into(restaurants::table)
                    .values(&NewRestaurant { name, address })
                    .returning(restaurants::id)
                    .get_result::<i32>(conn)
            })
            .collect::<QueryResult<Vec<_>>>()?;

        info!("Creating pizzas...");
        let pizza_ids = PIZZAS
            .iter()
            .map(|&(name, ingredients)| {
                diesel::insert_into(pizzas::table)
                    .values(&NewPizza { name, ingredients })
                    .returning(pizzas::id)
                    .get_result::<i32>(conn)
            })
            .collect::<QueryResult<Vec<_>>>()?;

        info!("Creating RestaurantPizza...");
        let rows = RESTAURANT_PIZZAS
            .iter()
            .map(|&(r, p, price)| NewRestaurantPizza {
                price,
                pizza_id: pizza_ids[p],
                restaurant_id: restaurant_ids[r],
            })
            .collect::<Vec<_>>();
        for row in &rows {
            diesel::insert_into(restaurant_pizzas::table)
                .values(row)
                .execute(conn)?;
        }

        info!("Seeding done!");
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::models::{Pizza, Restaurant};

    #[test]
    fn test_seed_is_idempotent() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();

        seed(conn).unwrap();
        seed(conn).unwrap();

        let restaurants = restaurants::table
            .select(Restaurant::as_select())
            .order(restaurants::id.asc())
            .load(conn)
            .unwrap();
        let pizzas = pizzas::table
            .select(Pizza::as_select())
            .load(conn)
            .unwrap();
        let associations: i64 = restaurant_pizzas::table.count().get_result(conn).unwrap();

        assert_eq!(
            restaurants.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            vec!["Karen's Pizza Shack", "Sanjay's Pizza", "Kiki's Pizza"]
        );
        assert_eq!(pizzas.len(), 3);
        assert_eq!(associations, 3);
    }
}
