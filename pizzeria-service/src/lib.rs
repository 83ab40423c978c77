use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod api_models;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod schema;
pub mod seed;
pub mod serializer;

use config::Config;
use db::DbPool;
use handlers::{
    ApiDoc, AppState, index_router, pizza_router, restaurant_pizza_router, restaurant_router,
};

pub fn app(pool: DbPool) -> Router {
    let state = AppState { pool };

    Router::new()
        .merge(index_router())
        .merge(restaurant_router())
        .merge(pizza_router())
        .merge(restaurant_pizza_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

pub async fn serve(config: &Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let pool = db::establish_pool(&config.database_url, config.pool_size)?;
    db::run_migrations(&pool)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Pizzeria API listening on {}", listener.local_addr()?);

    axum::serve(listener, app(pool)).await?;

    Ok(())
}
