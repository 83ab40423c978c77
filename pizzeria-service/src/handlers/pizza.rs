use axum::{Router, extract::State, response::Json, routing::get};
use serde_json::Value;
use tracing::instrument;

use crate::api_models::PizzaSummary;
use crate::db::interact;
use crate::error::ApiError;
use crate::repository;
use crate::serializer::serialize_pizza_summary;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "List of pizzas", body = [PizzaSummary]),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let pizzas = interact(&state.pool, |conn| Ok(repository::list_pizzas(conn)?)).await?;

    Ok(Json(pizzas.iter().map(serialize_pizza_summary).collect()))
}
