use serde::{Deserialize, Serialize};

use crate::point_of_interest::PointOfInterest;

/// A city and the points of interest it owns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct City {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub points_of_interest: Vec<PointOfInterest>,
}

impl City {
    pub fn new(id: i32, name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.map(str::to_string),
            points_of_interest: Vec::new(),
        }
    }

    pub fn with_point_of_interest(mut self, poi: PointOfInterest) -> Self {
        self.points_of_interest.push(poi);
        self
    }

    pub fn number_of_points_of_interest(&self) -> usize {
        self.points_of_interest.len()
    }

    /// First match by id.
    pub fn point_of_interest(&self, id: i32) -> Option<&PointOfInterest> {
        self.points_of_interest.iter().find(|p| p.id == id)
    }

    pub fn point_of_interest_mut(&mut self, id: i32) -> Option<&mut PointOfInterest> {
        self.points_of_interest.iter_mut().find(|p| p.id == id)
    }

    /// Remove the first point of interest with `id`, returning it.
    pub fn remove_point_of_interest(&mut self, id: i32) -> Option<PointOfInterest> {
        let idx = self.points_of_interest.iter().position(|p| p.id == id)?;
        Some(self.points_of_interest.remove(idx))
    }
}

/// Full city representation including its points of interest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub number_of_points_of_interest: usize,
    pub points_of_interest: Vec<PointOfInterest>,
}

impl From<&City> for CityDto {
    fn from(city: &City) -> Self {
        Self {
            id: city.id,
            name: city.name.clone(),
            description: city.description.clone(),
            number_of_points_of_interest: city.number_of_points_of_interest(),
            points_of_interest: city.points_of_interest.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityWithoutPointsOfInterestDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub number_of_points_of_interest: usize,
}

impl From<&City> for CityWithoutPointsOfInterestDto {
    fn from(city: &City) -> Self {
        Self {
            id: city.id,
            name: city.name.clone(),
            description: city.description.clone(),
            number_of_points_of_interest: city.number_of_points_of_interest(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> City {
        City::new(3, "Paris", Some("The one with that big tower."))
            .with_point_of_interest(PointOfInterest::new(5, "Eiffel Tower", None))
            .with_point_of_interest(PointOfInterest::new(6, "The Louvre", None))
    }

    #[test]
    fn count_is_derived_from_collection() {
        let mut city = paris();
        assert_eq!(city.number_of_points_of_interest(), 2);
        assert!(city.remove_point_of_interest(5).is_some());
        assert_eq!(city.number_of_points_of_interest(), 1);
        assert!(city.remove_point_of_interest(5).is_none());
    }

    #[test]
    fn dto_uses_camel_case_keys() -> anyhow::Result<()> {
        let json = serde_json::to_value(CityDto::from(&paris()))?;
        assert_eq!(json["numberOfPointsOfInterest"], 2);
        assert_eq!(json["pointsOfInterest"][1]["name"], "The Louvre");

        let json = serde_json::to_value(CityWithoutPointsOfInterestDto::from(&paris()))?;
        assert!(json.get("pointsOfInterest").is_none());
        Ok(())
    }
}
