use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use models::{PatchDocument, PointOfInterest, PointOfInterestForCreation, PointOfInterestForUpdate};
use service::errors::ServiceError;
use tracing::{error, info};

use crate::errors::JsonApiError;
use crate::state::AppState;

/// Location of a single point of interest, as returned by `create`.
pub fn point_of_interest_location(city_id: i32, point_of_interest_id: i32) -> String {
    format!("/api/cities/{city_id}/pointsofinterest/{point_of_interest_id}")
}

/// List is the one read path that converts unexpected faults into a generic 500.
#[utoipa::path(
    get,
    path = "/api/cities/{city_id}/pointsofinterest",
    tag = "points_of_interest",
    params(("city_id" = i32, Path, description = "City id")),
    responses(
        (status = 200, description = "OK", body = [crate::openapi::PointOfInterestDoc]),
        (status = 404, description = "City not found"),
        (status = 500, description = "Internal fault")
    )
)]
pub async fn list_points_of_interest(
    State(state): State<AppState>,
    Path(city_id): Path<i32>,
) -> Result<Json<Vec<PointOfInterest>>, JsonApiError> {
    state
        .points_of_interest
        .list(city_id)
        .await
        .map(Json)
        .map_err(|e| list_failure(city_id, e))
}

/// Not found passes through; anything else becomes a generic 500 with the cause logged only.
fn list_failure(city_id: i32, e: ServiceError) -> JsonApiError {
    match e {
        ServiceError::NotFound(_) => {
            info!(city_id, "city wasn't found when accessing points of interest");
            e.into()
        }
        _ => {
            error!(city_id, error = %e, "exception while getting points of interest");
            JsonApiError::internal()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/cities/{city_id}/pointsofinterest/{point_of_interest_id}",
    tag = "points_of_interest",
    params(
        ("city_id" = i32, Path, description = "City id"),
        ("point_of_interest_id" = i32, Path, description = "Point of interest id")
    ),
    responses((status = 200, description = "OK", body = crate::openapi::PointOfInterestDoc), (status = 404, description = "Not Found"))
)]
pub async fn get_point_of_interest(
    State(state): State<AppState>,
    Path((city_id, point_of_interest_id)): Path<(i32, i32)>,
) -> Result<Json<PointOfInterest>, JsonApiError> {
    let poi = state.points_of_interest.get(city_id, point_of_interest_id).await?;
    Ok(Json(poi))
}

#[utoipa::path(
    post,
    path = "/api/cities/{city_id}/pointsofinterest",
    tag = "points_of_interest",
    params(("city_id" = i32, Path, description = "City id")),
    request_body = crate::openapi::PointOfInterestInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::PointOfInterestDoc),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "City not found")
    )
)]
pub async fn create_point_of_interest(
    State(state): State<AppState>,
    Path(city_id): Path<i32>,
    payload: Result<Json<PointOfInterestForCreation>, JsonRejection>,
) -> Result<impl IntoResponse, JsonApiError> {
    let Json(input) = payload?;
    let created = state.points_of_interest.create(city_id, input).await?;
    let location = point_of_interest_location(city_id, created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/cities/{city_id}/pointsofinterest/{point_of_interest_id}",
    tag = "points_of_interest",
    params(
        ("city_id" = i32, Path, description = "City id"),
        ("point_of_interest_id" = i32, Path, description = "Point of interest id")
    ),
    request_body = crate::openapi::PointOfInterestInputDoc,
    responses((status = 204, description = "Replaced"), (status = 400, description = "Validation failed"), (status = 404, description = "Not Found"))
)]
pub async fn update_point_of_interest(
    State(state): State<AppState>,
    Path((city_id, point_of_interest_id)): Path<(i32, i32)>,
    payload: Result<Json<PointOfInterestForUpdate>, JsonRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Json(input) = payload?;
    state.points_of_interest.update(city_id, point_of_interest_id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Body is a JSON Patch array, e.g. `[{"op":"replace","path":"/name","value":"x"}]`.
#[utoipa::path(
    patch,
    path = "/api/cities/{city_id}/pointsofinterest/{point_of_interest_id}",
    tag = "points_of_interest",
    params(
        ("city_id" = i32, Path, description = "City id"),
        ("point_of_interest_id" = i32, Path, description = "Point of interest id")
    ),
    request_body(content = [crate::openapi::PatchOperationDoc], content_type = "application/json-patch+json"),
    responses((status = 204, description = "Patched"), (status = 400, description = "Validation failed"), (status = 404, description = "Not Found"))
)]
pub async fn partially_update_point_of_interest(
    State(state): State<AppState>,
    Path((city_id, point_of_interest_id)): Path<(i32, i32)>,
    payload: Result<Json<PatchDocument>, JsonRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Json(patch) = payload?;
    state
        .points_of_interest
        .partially_update(city_id, point_of_interest_id, patch)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/cities/{city_id}/pointsofinterest/{point_of_interest_id}",
    tag = "points_of_interest",
    params(
        ("city_id" = i32, Path, description = "City id"),
        ("point_of_interest_id" = i32, Path, description = "Point of interest id")
    ),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete_point_of_interest(
    State(state): State<AppState>,
    Path((city_id, point_of_interest_id)): Path<(i32, i32)>,
) -> Result<StatusCode, JsonApiError> {
    state.points_of_interest.delete(city_id, point_of_interest_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
