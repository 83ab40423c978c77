pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

pub use pizza::router as pizza_router;
pub use restaurant::router as restaurant_router;
pub use restaurant_pizza::router as restaurant_pizza_router;

use axum::{Router, routing::get};
use utoipa::OpenApi;

use crate::db::DbPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

pub fn index_router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index() -> &'static str {
    "Code challenge"
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        restaurant_pizza::create_restaurant_pizza,
    ),
    components(
        schemas(
            crate::api_models::RestaurantSummary,
            crate::api_models::RestaurantDetails,
            crate::api_models::RestaurantPizzaEntry,
            crate::api_models::PizzaSummary,
            crate::api_models::CreateRestaurantPizzaRequest,
            crate::api_models::RestaurantPizzaResponse,
            crate::api_models::ApiErrorResponse,
            crate::api_models::ApiErrorsResponse
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant endpoints"),
        (name = "pizzas", description = "Pizza endpoints"),
        (name = "restaurant_pizzas", description = "Restaurant pizza price endpoints")
    ),
    info(
        title = "Pizzeria API",
        description = "Restaurants, pizzas and the prices restaurants charge for them",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
