//! Domain types for the city info API.
//! - `City` owns its `PointOfInterest`s.
//! - Input DTOs carry the required-field rules shared by create, replace and patch.
//! - `patch` holds the JSON Patch document applied to a staging copy.

pub mod errors;
pub mod city;
pub mod point_of_interest;
pub mod patch;

pub use city::{City, CityDto, CityWithoutPointsOfInterestDto};
pub use errors::ValidationErrors;
pub use patch::{PatchDocument, PatchOperation};
pub use point_of_interest::{PointOfInterest, PointOfInterestForCreation, PointOfInterestForUpdate};
