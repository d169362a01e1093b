pub mod cities;
pub mod points_of_interest;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::AppState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: health, cities, points of interest and API docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let cities = Router::new()
        .route("/api/cities", get(cities::list_cities))
        .route("/api/cities/:city_id", get(cities::get_city));

    let points_of_interest = Router::new()
        .route(
            "/api/cities/:city_id/pointsofinterest",
            get(points_of_interest::list_points_of_interest)
                .post(points_of_interest::create_point_of_interest),
        )
        .route(
            "/api/cities/:city_id/pointsofinterest/:point_of_interest_id",
            get(points_of_interest::get_point_of_interest)
                .put(points_of_interest::update_point_of_interest)
                .patch(points_of_interest::partially_update_point_of_interest)
                .delete(points_of_interest::delete_point_of_interest),
        );

    Router::new()
        .route("/health", get(health))
        .merge(cities)
        .merge(points_of_interest)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx 以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
