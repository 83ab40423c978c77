use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde_json::Value;
use tracing::{info, instrument};

use crate::api_models::{ApiErrorResponse, RestaurantDetails, RestaurantSummary};
use crate::db::interact;
use crate::error::ApiError;
use crate::repository;
use crate::serializer::{serialize_restaurant_details, serialize_restaurant_summary};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

/// Path ids that are not integers name no restaurant.
fn parse_restaurant_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| ApiError::RestaurantNotFound)
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "List of restaurants", body = [RestaurantSummary]),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let restaurants = interact(&state.pool, |conn| Ok(repository::list_restaurants(conn)?)).await?;

    Ok(Json(
        restaurants
            .iter()
            .map(serialize_restaurant_summary)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant details", body = RestaurantDetails),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_restaurant_id(&id)?;

    let details = interact(&state.pool, move |conn| {
        let restaurant =
            repository::find_restaurant(conn, id)?.ok_or(ApiError::RestaurantNotFound)?;
        let restaurant_pizzas = repository::restaurant_pizzas_for(conn, &restaurant)?;
        Ok(serialize_restaurant_details(&restaurant, &restaurant_pizzas))
    })
    .await?;

    Ok(Json(details))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant and its pizza prices deleted"),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_restaurant_id(&id)?;

    let deleted = interact(&state.pool, move |conn| {
        Ok(repository::delete_restaurant(conn, id)?)
    })
    .await?;

    if !deleted {
        return Err(ApiError::RestaurantNotFound);
    }

    info!(restaurant_id = id, "deleted restaurant");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_restaurant_id() {
        assert_eq!(parse_restaurant_id("12").unwrap(), 12);
        assert!(matches!(
            parse_restaurant_id("abc"),
            Err(ApiError::RestaurantNotFound)
        ));
        assert!(matches!(
            parse_restaurant_id("99999999999"),
            Err(ApiError::RestaurantNotFound)
        ));
    }
}
