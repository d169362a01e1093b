use models::ValidationErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error("mail error: {0}")]
    Mail(String),
}

impl ServiceError {
    pub fn city_not_found(city_id: i32) -> Self {
        Self::NotFound(format!("city {city_id} not found"))
    }

    pub fn point_of_interest_not_found(city_id: i32, point_of_interest_id: i32) -> Self {
        Self::NotFound(format!("point of interest {point_of_interest_id} not found in city {city_id}"))
    }
}
