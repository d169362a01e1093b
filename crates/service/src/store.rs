use std::sync::Arc;

use models::{City, PointOfInterest};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory city store living for the whole process.
///
/// Constructed once at startup and handed to the services; clones share the
/// same underlying list. Nothing is persisted.
#[derive(Clone, Debug)]
pub struct CitiesDataStore {
    inner: Arc<RwLock<Vec<City>>>,
}

impl CitiesDataStore {
    /// Store populated with the fixed sample data: three cities, points of interest 1..=6.
    pub fn seeded() -> Self {
        Self::from_cities(seed_cities())
    }

    pub fn from_cities(cities: Vec<City>) -> Self {
        Self { inner: Arc::new(RwLock::new(cities)) }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Vec<City>> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Vec<City>> {
        self.inner.write().await
    }
}

impl Default for CitiesDataStore {
    fn default() -> Self {
        Self::seeded()
    }
}

/// First match by id.
pub fn find_city(cities: &[City], city_id: i32) -> Option<&City> {
    cities.iter().find(|c| c.id == city_id)
}

pub fn find_city_mut(cities: &mut [City], city_id: i32) -> Option<&mut City> {
    cities.iter_mut().find(|c| c.id == city_id)
}

/// Next point of interest id: highest id across every city, plus one.
/// Ids are global to the store, not scoped to a city. An empty store starts at 1.
pub fn next_point_of_interest_id(cities: &[City]) -> i32 {
    cities
        .iter()
        .flat_map(|c| c.points_of_interest.iter())
        .map(|p| p.id)
        .max()
        .unwrap_or(0)
        + 1
}

fn seed_cities() -> Vec<City> {
    vec![
        City::new(1, "New York City", Some("The one with that big park."))
            .with_point_of_interest(PointOfInterest::new(
                1,
                "Central Park",
                Some("The most visited urban park in the United States."),
            ))
            .with_point_of_interest(PointOfInterest::new(
                2,
                "Empire State Building",
                Some("A 102-story skyscraper located in Midtown Manhattan."),
            )),
        City::new(2, "Antwerp", Some("The one with the cathedral that was never really finished."))
            .with_point_of_interest(PointOfInterest::new(
                3,
                "Cathedral of Our Lady",
                Some("A Gothic style cathedral, conceived by architects Jan and Pieter Appelmans."),
            ))
            .with_point_of_interest(PointOfInterest::new(
                4,
                "Antwerp Central Station",
                Some("The finest example of railway architecture in Belgium."),
            )),
        City::new(3, "Paris", Some("The one with that big tower."))
            .with_point_of_interest(PointOfInterest::new(
                5,
                "Eiffel Tower",
                Some("A wrought iron lattice tower on the Champ de Mars, named after engineer Gustave Eiffel."),
            ))
            .with_point_of_interest(PointOfInterest::new(
                6,
                "The Louvre",
                Some("The world's largest museum."),
            )),
    ]
}
