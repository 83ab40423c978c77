use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::post,
};
use diesel::result::{DatabaseErrorKind, Error::DatabaseError};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::api_models::{ApiErrorsResponse, CreateRestaurantPizzaRequest, RestaurantPizzaResponse};
use crate::db::interact;
use crate::error::ApiError;
use crate::models::{NewRestaurantPizza, ValidationError};
use crate::repository;
use crate::serializer::serialize_restaurant_pizza;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

fn as_id(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|id| i32::try_from(id).ok())
}

/// A referenced row deleted after lookup surfaces as a foreign key failure.
fn insert_error(e: diesel::result::Error) -> ApiError {
    match e {
        DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => ApiError::ReferenceNotFound,
        e => e.into(),
    }
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Restaurant pizza created", body = RestaurantPizzaResponse),
        (status = 400, description = "Missing fields or invalid price", body = ApiErrorsResponse),
        (status = 404, description = "Pizza or restaurant not found", body = ApiErrorsResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(payload) =
        payload.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;
    let payload = CreateRestaurantPizzaRequest::from(payload);

    let (Some(price), Some(pizza_id), Some(restaurant_id)) =
        (payload.price, payload.pizza_id, payload.restaurant_id)
    else {
        return Err(ApiError::MissingFields);
    };

    // Ids that are not integers can never resolve.
    let (Some(pizza_id), Some(restaurant_id)) = (as_id(&pizza_id), as_id(&restaurant_id)) else {
        return Err(ApiError::ReferenceNotFound);
    };
    let price = price.as_i64().ok_or(ValidationError::PriceNotInteger);

    let body = interact(&state.pool, move |conn| {
        // Holds the write lock from lookup to insert so a concurrent delete waits.
        conn.immediate_transaction::<_, ApiError, _>(|conn| {
            let pizza = repository::find_pizza(conn, pizza_id)?;
            let restaurant = repository::find_restaurant(conn, restaurant_id)?;
            let (Some(pizza), Some(restaurant)) = (pizza, restaurant) else {
                return Err(ApiError::ReferenceNotFound);
            };

            let new_restaurant_pizza = NewRestaurantPizza::new(price?, pizza.id, restaurant.id)?;
            let restaurant_pizza = repository::insert_restaurant_pizza(conn, &new_restaurant_pizza)
                .map_err(insert_error)?;
            info!(
                restaurant_pizza_id = restaurant_pizza.id,
                pizza_id, restaurant_id, "created restaurant pizza"
            );

            Ok(serialize_restaurant_pizza(
                &restaurant_pizza,
                &pizza,
                &restaurant,
            ))
        })
    })
    .await?;

    Ok((StatusCode::CREATED, Json(body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_as_id() {
        assert_eq!(as_id(&json!(3)), Some(3));
        assert_eq!(as_id(&json!("3")), None);
        assert_eq!(as_id(&json!(1.5)), None);
        assert_eq!(as_id(&json!(i64::MAX)), None);
    }

    #[test]
    fn test_foreign_key_failure_maps_to_reference_not_found() {
        let fk = DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("FOREIGN KEY constraint failed".to_string()),
        );
        assert!(matches!(insert_error(fk), ApiError::ReferenceNotFound));

        let other = diesel::result::Error::NotFound;
        assert!(matches!(insert_error(other), ApiError::Database(_)));
    }

    #[test]
    fn test_request_from_map_treats_null_as_missing() {
        let body = json!({ "price": null, "pizza_id": 1, "extra": true });
        let Value::Object(map) = body else {
            unreachable!()
        };

        let request = CreateRestaurantPizzaRequest::from(map);
        assert!(request.price.is_none());
        assert_eq!(request.pizza_id, Some(json!(1)));
        assert!(request.restaurant_id.is_none());
    }
}
