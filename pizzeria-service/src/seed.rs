use diesel::prelude::*;
use tracing::info;

use crate::models::{NewPizza, NewRestaurant, NewRestaurantPizza, ValidationError};
use crate::repository;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("Invalid seed data: {0}")]
    Validation(#[from] ValidationError),
}

const RESTAURANTS: &[(&str, &str)] = &[
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: &[(&str, &str)] = &[
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// (price, pizza index, restaurant index)
const PRICES: &[(i64, usize, usize)] = &[(1, 0, 0), (4, 1, 1), (5, 2, 2)];

#[derive(Debug, PartialEq, Eq)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub pizzas: usize,
    pub restaurant_pizzas: usize,
}

/// Replaces every row with the sample data set, in a single transaction.
pub fn run(conn: &mut SqliteConnection) -> Result<SeedSummary, SeedError> {
    conn.transaction::<_, SeedError, _>(|conn| {
        repository::clear_all(conn)?;

        let restaurants = RESTAURANTS
            .iter()
            .map(|&(name, address)| {
                repository::insert_restaurant(conn, &NewRestaurant { name, address })
            })
            .collect::<QueryResult<Vec<_>>>()?;

        let pizzas = PIZZAS
            .iter()
            .map(|&(name, ingredients)| {
                repository::insert_pizza(conn, &NewPizza { name, ingredients })
            })
            .collect::<QueryResult<Vec<_>>>()?;

        for &(price, pizza, restaurant) in PRICES {
            let restaurant_pizza =
                NewRestaurantPizza::new(price, pizzas[pizza].id, restaurants[restaurant].id)?;
            repository::insert_restaurant_pizza(conn, &restaurant_pizza)?;
        }

        let summary = SeedSummary {
            restaurants: restaurants.len(),
            pizzas: pizzas.len(),
            restaurant_pizzas: PRICES.len(),
        };
        info!(?summary, "seeded database");
        Ok(summary)
    })
}
