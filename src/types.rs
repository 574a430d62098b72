//! Core types for cabs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::{Error, Result};

/// Cab identifier, assigned by the store when a cab is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CabId(Uuid);

impl CabId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CabId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| Error::InvalidId(s.to_string()))
    }
}

/// A stored cab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cab {
    pub id: CabId,
    /// Unique across all cabs
    pub registration_number: String,
    pub model: String,
    pub colour: String,
}

/// Cab fields as submitted by a client.
///
/// Every field is optional at this level. Whether a missing field is an error
/// is decided by the store: creation requires all of them, updates defer to
/// the configured [`UpdatePolicy`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CabDraft {
    #[serde(default, alias = "cabRegistrationNumber")]
    pub registration_number: Option<String>,
    #[serde(default, alias = "cabModel")]
    pub model: Option<String>,
    #[serde(default, alias = "cabColour")]
    pub colour: Option<String>,
}

impl CabDraft {
    pub fn new(
        registration_number: impl Into<String>,
        model: impl Into<String>,
        colour: impl Into<String>,
    ) -> Self {
        Self {
            registration_number: Some(registration_number.into()),
            model: Some(model.into()),
            colour: Some(colour.into()),
        }
    }

    /// Build a new cab, requiring every field to be present and non-empty
    pub fn into_cab(self, id: CabId) -> Result<Cab> {
        Ok(Cab {
            id,
            registration_number: required("registrationNumber", self.registration_number)?,
            model: required("model", self.model)?,
            colour: required("colour", self.colour)?,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::validation(format!("`{}` is required", field))),
    }
}

/// How an update treats fields the client left out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdatePolicy {
    /// Write all three fields; omitted ones become empty
    #[default]
    Replace,
    /// Only overwrite the fields that were supplied
    Merge,
}

impl UpdatePolicy {
    /// Compute the record that an update of `current` with `draft` produces.
    ///
    /// The id never changes. Uniqueness is checked by the caller.
    pub fn apply(self, current: &Cab, draft: CabDraft) -> Result<Cab> {
        match self {
            UpdatePolicy::Replace => Ok(Cab {
                id: current.id,
                registration_number: draft.registration_number.unwrap_or_default(),
                model: draft.model.unwrap_or_default(),
                colour: draft.colour.unwrap_or_default(),
            }),
            UpdatePolicy::Merge => Ok(Cab {
                id: current.id,
                registration_number: merged(
                    "registrationNumber",
                    &current.registration_number,
                    draft.registration_number,
                )?,
                model: merged("model", &current.model, draft.model)?,
                colour: merged("colour", &current.colour, draft.colour)?,
            }),
        }
    }
}

fn merged(field: &str, current: &str, value: Option<String>) -> Result<String> {
    match value {
        None => Ok(current.to_string()),
        Some(value) if value.is_empty() => {
            Err(Error::validation(format!("`{}` must not be empty", field)))
        }
        Some(value) => Ok(value),
    }
}

impl FromStr for UpdatePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "replace" => Ok(UpdatePolicy::Replace),
            "merge" => Ok(UpdatePolicy::Merge),
            other => Err(Error::InvalidRequest(format!(
                "unsupported update policy: {}",
                other
            ))),
        }
    }
}
