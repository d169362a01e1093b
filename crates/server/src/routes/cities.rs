use axum::{
    extract::{Path, Query, State},
    Json,
};
use models::CityWithoutPointsOfInterestDto;
use serde::Deserialize;
use service::cities::CityView;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityQuery {
    #[serde(default)]
    pub include_points_of_interest: bool,
}

/// All cities, without their points of interest.
#[utoipa::path(get, path = "/api/cities", tag = "cities", responses((status = 200, description = "OK", body = [crate::openapi::CityWithoutPointsOfInterestDoc])))]
pub async fn list_cities(State(state): State<AppState>) -> Json<Vec<CityWithoutPointsOfInterestDto>> {
    Json(state.cities.list_cities().await)
}

#[utoipa::path(
    get,
    path = "/api/cities/{city_id}",
    tag = "cities",
    params(
        ("city_id" = i32, Path, description = "City id"),
        ("includePointsOfInterest" = Option<bool>, Query, description = "Embed the city's points of interest")
    ),
    responses((status = 200, description = "OK", body = crate::openapi::CityDoc), (status = 404, description = "Not Found"))
)]
pub async fn get_city(
    State(state): State<AppState>,
    Path(city_id): Path<i32>,
    Query(query): Query<CityQuery>,
) -> Result<Json<CityView>, JsonApiError> {
    let city = state.cities.get_city(city_id, query.include_points_of_interest).await?;
    Ok(Json(city))
}
