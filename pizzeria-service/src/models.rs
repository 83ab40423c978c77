use diesel::prelude::*;

use crate::schema::{pizzas, restaurant_pizzas, restaurants};

pub const MIN_PRICE: i64 = 1;
pub const MAX_PRICE: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("price must be between {MIN_PRICE} and {MAX_PRICE}, got {0}")]
    PriceOutOfRange(i64),
    #[error("price must be an integer")]
    PriceNotInteger,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant<'a> {
    pub name: &'a str,
    pub address: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = pizzas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct NewPizza<'a> {
    pub name: &'a str,
    pub ingredients: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(belongs_to(Pizza))]
#[diesel(table_name = restaurant_pizzas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
}

/// An association that has passed price validation and may be inserted.
///
/// Fields are private: [`NewRestaurantPizza::new`] is the only constructor.
#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurant_pizzas)]
pub struct NewRestaurantPizza {
    price: i32,
    pizza_id: i32,
    restaurant_id: i32,
}

impl NewRestaurantPizza {
    pub fn new(price: i64, pizza_id: i32, restaurant_id: i32) -> Result<Self, ValidationError> {
        if !(MIN_PRICE..=MAX_PRICE).contains(&price) {
            return Err(ValidationError::PriceOutOfRange(price));
        }

        Ok(Self {
            // in range, so it fits
            price: price as i32,
            pizza_id,
            restaurant_id,
        })
    }

    pub fn price(&self) -> i32 {
        self.price
    }

    pub fn pizza_id(&self) -> i32 {
        self.pizza_id
    }

    pub fn restaurant_id(&self) -> i32 {
        self.restaurant_id
    }
}
