//! Core domain types for CycleSync.
//!
//! This crate contains pure domain types with no IO, no clock reads, and minimal
//! dependencies. Every record is validated at construction, so holding a value
//! of one of these types means its invariants hold.

mod cycle;
mod ids;
mod partner;
mod settings;
mod sharing;

pub use cycle::{CycleLength, CycleProfile, Energy, Mood, Phase};
pub use ids::{NotificationId, PartnerId, UserId};
pub use partner::{Consent, Invite, Partner, User};
pub use settings::NotificationSettings;
pub use sharing::{DataSharing, SharedField};

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Validation
// ============================================================================

/// Input rejected before any record is built or any computation runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error(
        "cycle length must be between {} and {} days (got {days})",
        CycleLength::MIN,
        CycleLength::MAX
    )]
    InvalidCycleLength { days: u32 },
    #[error("unknown relationship: {0}")]
    UnknownRelationship(String),
    #[error("partner id {0} appears more than once")]
    DuplicatePartnerId(PartnerId),
    #[error("no partner ids left to assign")]
    PartnerIdsExhausted,
}

// ============================================================================
// Names
// ============================================================================

/// A display name, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            Err(ValidationError::EmptyName)
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for PersonName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PersonName {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

impl Deref for PersonName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Relationship
// ============================================================================

/// How the tracking user relates to the person sharing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    #[default]
    Partner,
    Daughter,
    Friend,
    Colleague,
}

impl Relationship {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Relationship::Partner => "partner",
            Relationship::Daughter => "daughter",
            Relationship::Friend => "friend",
            Relationship::Colleague => "colleague",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Relationship::Partner => "Romantic Partner",
            Relationship::Daughter => "Daughter",
            Relationship::Friend => "Friend",
            Relationship::Colleague => "Colleague",
        }
    }

    #[must_use]
    pub fn all() -> &'static [Relationship] {
        &[
            Relationship::Partner,
            Relationship::Daughter,
            Relationship::Friend,
            Relationship::Colleague,
        ]
    }
}

impl FromStr for Relationship {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Relationship::all()
            .iter()
            .copied()
            .find(|relationship| relationship.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::UnknownRelationship(trimmed.to_string()))
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
