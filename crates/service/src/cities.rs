use models::{CityDto, CityWithoutPointsOfInterestDto};

use crate::errors::ServiceError;
use crate::store::{find_city, CitiesDataStore};

/// Read-only view of a city, with or without its points of interest.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum CityView {
    Full(CityDto),
    Summary(CityWithoutPointsOfInterestDto),
}

/// Cities are seeded once and never created or deleted.
pub struct CityService {
    store: CitiesDataStore,
}

impl CityService {
    pub fn new(store: CitiesDataStore) -> Self {
        Self { store }
    }

    pub async fn list_cities(&self) -> Vec<CityWithoutPointsOfInterestDto> {
        let cities = self.store.read().await;
        cities.iter().map(CityWithoutPointsOfInterestDto::from).collect()
    }

    pub async fn get_city(&self, city_id: i32, include_points_of_interest: bool) -> Result<CityView, ServiceError> {
        let cities = self.store.read().await;
        let city = find_city(&cities, city_id).ok_or_else(|| ServiceError::city_not_found(city_id))?;
        Ok(if include_points_of_interest {
            CityView::Full(CityDto::from(city))
        } else {
            CityView::Summary(CityWithoutPointsOfInterestDto::from(city))
        })
    }
}
