use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct PointOfInterestDoc {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Create and replace payload.
#[derive(Serialize, ToSchema)]
pub struct PointOfInterestInputDoc {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CityWithoutPointsOfInterestDoc {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub number_of_points_of_interest: usize,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CityDoc {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub number_of_points_of_interest: usize,
    pub points_of_interest: Vec<PointOfInterestDoc>,
}

/// One JSON Patch operation; `from` is used by `copy`/`move`, `value` by `add`/`replace`/`test`.
#[derive(Serialize, ToSchema)]
pub struct PatchOperationDoc {
    pub op: String,
    pub path: String,
    pub from: Option<String>,
    #[schema(value_type = Object)]
    pub value: Option<serde_json::Value>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::cities::list_cities,
        crate::routes::cities::get_city,
        crate::routes::points_of_interest::list_points_of_interest,
        crate::routes::points_of_interest::get_point_of_interest,
        crate::routes::points_of_interest::create_point_of_interest,
        crate::routes::points_of_interest::update_point_of_interest,
        crate::routes::points_of_interest::partially_update_point_of_interest,
        crate::routes::points_of_interest::delete_point_of_interest,
    ),
    components(
        schemas(
            HealthResponse,
            PointOfInterestDoc,
            PointOfInterestInputDoc,
            CityWithoutPointsOfInterestDoc,
            CityDoc,
            PatchOperationDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "cities"),
        (name = "points_of_interest")
    )
)]
pub struct ApiDoc;
