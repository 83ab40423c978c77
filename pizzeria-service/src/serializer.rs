use serde_json::{Map, Value, json};

use crate::models;

pub const RESTAURANT_FIELDS: &[&str] = &["id", "name", "address"];
pub const PIZZA_FIELDS: &[&str] = &["id", "name", "ingredients"];

/// Field-level serialization of a row into a JSON object.
///
/// Only scalar columns are emitted. Relations are never followed here, so a
/// restaurant and its associations cannot serialize each other in a loop;
/// nested shapes are assembled explicitly by the functions below.
pub trait ToDict {
    fn fields(&self) -> Vec<(&'static str, Value)>;

    /// Serializes every scalar field, or only those named in `only`.
    fn to_dict(&self, only: Option<&[&str]>) -> Map<String, Value> {
        self.fields()
            .into_iter()
            .filter(|(name, _)| only.is_none_or(|allowed| allowed.contains(name)))
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }
}

impl ToDict for models::Restaurant {
    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", json!(self.id)),
            ("name", json!(self.name)),
            ("address", json!(self.address)),
        ]
    }
}

impl ToDict for models::Pizza {
    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", json!(self.id)),
            ("name", json!(self.name)),
            ("ingredients", json!(self.ingredients)),
        ]
    }
}

impl ToDict for models::RestaurantPizza {
    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", json!(self.id)),
            ("price", json!(self.price)),
            ("pizza_id", json!(self.pizza_id)),
            ("restaurant_id", json!(self.restaurant_id)),
        ]
    }
}

pub fn serialize_restaurant_summary(restaurant: &models::Restaurant) -> Value {
    Value::Object(restaurant.to_dict(Some(RESTAURANT_FIELDS)))
}

pub fn serialize_pizza_summary(pizza: &models::Pizza) -> Value {
    Value::Object(pizza.to_dict(Some(PIZZA_FIELDS)))
}

pub fn serialize_restaurant_details(
    restaurant: &models::Restaurant,
    restaurant_pizzas: &[(models::RestaurantPizza, models::Pizza)],
) -> Value {
    let mut details = restaurant.to_dict(None);
    details.insert(
        "restaurant_pizzas".to_string(),
        restaurant_pizzas
            .iter()
            .map(|(rp, pizza)| {
                json!({
                    "id": rp.id,
                    "pizza": serialize_pizza_summary(pizza),
                    "pizza_id": rp.pizza_id,
                    "price": rp.price,
                    "restaurant_id": rp.restaurant_id,
                })
            })
            .collect(),
    );
    Value::Object(details)
}

pub fn serialize_restaurant_pizza(
    restaurant_pizza: &models::RestaurantPizza,
    pizza: &models::Pizza,
    restaurant: &models::Restaurant,
) -> Value {
    json!({
        "id": restaurant_pizza.id,
        "pizza": serialize_pizza_summary(pizza),
        "pizza_id": restaurant_pizza.pizza_id,
        "price": restaurant_pizza.price,
        "restaurant": serialize_restaurant_summary(restaurant),
        "restaurant_id": restaurant_pizza.restaurant_id,
    })
}
