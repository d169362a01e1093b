//! JSON Patch (RFC 6902) restricted to the point-of-interest staging copy.
//!
//! Only the two mutable fields are addressable: `/name` and `/description`.
//! The leading slash is required; segment matching is case-insensitive. Applying a document stops at the
//! first failing operation; callers discard the staging copy in that case.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ValidationErrors;
use crate::point_of_interest::PointOfInterestForUpdate;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Copy { from: String, path: String },
    Move { from: String, path: String },
    Test { path: String, value: Value },
}

impl PatchOperation {
    pub fn replace(path: &str, value: impl Into<Value>) -> Self {
        Self::Replace { path: path.to_string(), value: value.into() }
    }

    pub fn remove(path: &str) -> Self {
        Self::Remove { path: path.to_string() }
    }

    fn path(&self) -> &str {
        match self {
            Self::Add { path, .. }
            | Self::Remove { path }
            | Self::Replace { path, .. }
            | Self::Copy { path, .. }
            | Self::Move { path, .. }
            | Self::Test { path, .. } => path,
        }
    }

    fn apply(&self, target: &mut PointOfInterestForUpdate) -> Result<(), String> {
        match self {
            Self::Add { path, value } | Self::Replace { path, value } => {
                Field::parse(path)?.set(target, value)
            }
            Self::Remove { path } => {
                Field::parse(path)?.reset(target);
                Ok(())
            }
            Self::Copy { from, path } => {
                let value = Field::parse(from)?.get(target);
                Field::parse(path)?.set(target, &value)
            }
            Self::Move { from, path } => {
                let source = Field::parse(from)?;
                let dest = Field::parse(path)?;
                let value = source.get(target);
                if source != dest {
                    source.reset(target);
                }
                dest.set(target, &value)
            }
            Self::Test { path, value } => {
                let current = Field::parse(path)?.get(target);
                if &current == value {
                    Ok(())
                } else {
                    Err(format!("The current value '{current}' at path '{path}' is not equal to the test value '{value}'."))
                }
            }
        }
    }
}

/// An ordered list of patch operations, as sent in a `PATCH` body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(pub Vec<PatchOperation>);

impl PatchDocument {
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        Self(operations)
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }

    /// Apply every operation in order. Errors are keyed by the failing operation's path.
    pub fn apply_to(&self, target: &mut PointOfInterestForUpdate) -> Result<(), ValidationErrors> {
        for op in &self.0 {
            if let Err(message) = op.apply(target) {
                return Err(ValidationErrors::single(op.path(), message));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Name,
    Description,
}

impl Field {
    fn parse(path: &str) -> Result<Self, String> {
        let Some(segment) = path.strip_prefix('/') else {
            return Err(format!("The path '{path}' must start with '/'."));
        };
        if segment.eq_ignore_ascii_case("name") {
            Ok(Self::Name)
        } else if segment.eq_ignore_ascii_case("description") {
            Ok(Self::Description)
        } else {
            Err(format!("The target location specified by path segment '{segment}' was not found."))
        }
    }

    fn get(self, target: &PointOfInterestForUpdate) -> Value {
        match self {
            Self::Name => Value::String(target.name.clone()),
            Self::Description => target.description.clone().map_or(Value::Null, Value::String),
        }
    }

    fn set(self, target: &mut PointOfInterestForUpdate, value: &Value) -> Result<(), String> {
        match (self, value) {
            (Self::Name, Value::String(s)) => target.name = s.clone(),
            // null clears; the required-field check rejects it afterwards
            (Self::Name, Value::Null) => target.name = String::new(),
            (Self::Description, Value::String(s)) => target.description = Some(s.clone()),
            (Self::Description, Value::Null) => target.description = None,
            (_, other) => return Err(format!("The value '{other}' is invalid for target location.")),
        }
        Ok(())
    }

    fn reset(self, target: &mut PointOfInterestForUpdate) {
        match self {
            Self::Name => target.name = String::new(),
            Self::Description => target.description = None,
        }
    }
}
