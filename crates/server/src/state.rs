use std::sync::Arc;

use service::{
    cities::CityService,
    mail::MailService,
    points_of_interest::PointOfInterestService,
    store::CitiesDataStore,
};

/// Shared handler state. Both services point at the same store.
#[derive(Clone)]
pub struct AppState {
    pub cities: Arc<CityService>,
    pub points_of_interest: Arc<PointOfInterestService>,
}

impl AppState {
    pub fn new(store: CitiesDataStore, mail: Arc<dyn MailService>) -> Self {
        Self {
            cities: Arc::new(CityService::new(store.clone())),
            points_of_interest: Arc::new(PointOfInterestService::new(store, mail)),
        }
    }
}
