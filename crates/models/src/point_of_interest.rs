use serde::{Deserialize, Serialize};

use crate::errors::ValidationErrors;

pub const NAME_FIELD: &str = "name";
pub const NAME_REQUIRED: &str = "You should provide a name value.";

/// A point of interest as stored and as returned to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl PointOfInterest {
    pub fn new(id: i32, name: impl Into<String>, description: Option<&str>) -> Self {
        Self { id, name: name.into(), description: description.map(str::to_string) }
    }

    /// Overwrite the mutable fields; `id` never changes.
    pub fn apply(&mut self, update: PointOfInterestForUpdate) {
        self.name = update.name;
        self.description = update.description;
    }
}

/// Create payload. A missing `name` deserialises to empty so it is reported by `validate`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterestForCreation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl PointOfInterestForCreation {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_name(&self.name)
    }
}

/// Replace payload, also the staging copy a patch is applied to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterestForUpdate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl PointOfInterestForUpdate {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_name(&self.name)
    }
}

impl From<&PointOfInterest> for PointOfInterestForUpdate {
    fn from(poi: &PointOfInterest) -> Self {
        Self { name: poi.name.clone(), description: poi.description.clone() }
    }
}

/// Whitespace-only names count as missing.
fn validate_name(name: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if name.trim().is_empty() {
        errors.add(NAME_FIELD, NAME_REQUIRED);
    }
    errors.into_result()
}
