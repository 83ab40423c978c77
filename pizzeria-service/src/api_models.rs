use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct RestaurantSummary {
    /// Unique identifier for the restaurant
    pub id: i32,
    /// Name of the restaurant
    pub name: String,
    /// Address of the restaurant
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct PizzaSummary {
    /// Unique identifier for the pizza
    pub id: i32,
    /// Name of the pizza
    pub name: String,
    /// Comma separated ingredients
    pub ingredients: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct RestaurantPizzaEntry {
    pub id: i32,
    pub pizza: PizzaSummary,
    pub pizza_id: i32,
    pub price: i32,
    pub restaurant_id: i32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct RestaurantDetails {
    pub address: String,
    pub id: i32,
    pub name: String,
    /// Pizzas served by the restaurant, ordered by association id
    pub restaurant_pizzas: Vec<RestaurantPizzaEntry>,
}

/// Body of `POST /restaurant_pizzas`.
///
/// Built from the decoded JSON object so that only objects are accepted and
/// absent or `null` keys can be reported as `Missing required fields`.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Price between 1 and 30
    #[schema(value_type = i64)]
    pub price: Option<Value>,
    #[schema(value_type = i32)]
    pub pizza_id: Option<Value>,
    #[schema(value_type = i32)]
    pub restaurant_id: Option<Value>,
}

impl From<Map<String, Value>> for CreateRestaurantPizzaRequest {
    fn from(mut body: Map<String, Value>) -> Self {
        let mut take = |key: &str| body.remove(key).filter(|value| !value.is_null());
        Self {
            price: take("price"),
            pizza_id: take("pizza_id"),
            restaurant_id: take("restaurant_id"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct RestaurantPizzaResponse {
    pub id: i32,
    pub pizza: PizzaSummary,
    pub pizza_id: i32,
    pub price: i32,
    pub restaurant: RestaurantSummary,
    pub restaurant_id: i32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ApiErrorsResponse {
    /// Error messages
    pub errors: Vec<String>,
}
