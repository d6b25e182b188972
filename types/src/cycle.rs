//! Cycle invariant types.
//!
//! `CycleLength` makes lengths outside the supported range unrepresentable.
//! The phase thresholds are fixed days of a 28-day template (ovulation on day
//! 14), so a cycle shorter than 15 days would never reach the luteal phase.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Validated cycle length in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CycleLength(u32);

impl CycleLength {
    pub const MIN: u32 = 15;
    pub const MAX: u32 = 45;
    pub const DEFAULT: CycleLength = CycleLength(28);

    pub fn new(days: u32) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&days) {
            Ok(Self(days))
        } else {
            Err(ValidationError::InvalidCycleLength { days })
        }
    }

    #[must_use]
    pub const fn days(self) -> u32 {
        self.0
    }
}

impl Default for CycleLength {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for CycleLength {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CycleLength> for u32 {
    fn from(value: CycleLength) -> Self {
        value.0
    }
}

impl fmt::Display for CycleLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The cycle inputs the phase engine needs for one person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleProfile {
    /// First day of the most recent period.
    #[serde(rename = "lastPeriodStart")]
    pub start_date: NaiveDate,
    #[serde(rename = "cycleLength")]
    pub length: CycleLength,
}

impl CycleProfile {
    #[must_use]
    pub const fn new(start_date: NaiveDate, length: CycleLength) -> Self {
        Self { start_date, length }
    }
}

/// A named segment of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Menstruation,
    Follicular,
    Ovulation,
    Luteal,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Menstruation => "Menstruation",
            Phase::Follicular => "Follicular",
            Phase::Ovulation => "Ovulation",
            Phase::Luteal => "Luteal",
        }
    }

    /// Lowercase form used inside sentences ("in her luteal phase").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Phase::Menstruation => "menstruation",
            Phase::Follicular => "follicular",
            Phase::Ovulation => "ovulation",
            Phase::Luteal => "luteal",
        }
    }

    /// The phase that follows this one. Luteal wraps to a new cycle.
    #[must_use]
    pub const fn next(self) -> Phase {
        match self {
            Phase::Menstruation => Phase::Follicular,
            Phase::Follicular => Phase::Ovulation,
            Phase::Ovulation => Phase::Luteal,
            Phase::Luteal => Phase::Menstruation,
        }
    }

    #[must_use]
    pub fn all() -> &'static [Phase] {
        &[
            Phase::Menstruation,
            Phase::Follicular,
            Phase::Ovulation,
            Phase::Luteal,
        ]
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Energy forecast for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Energy {
    Low,
    Rising,
    High,
    Declining,
}

impl Energy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Energy::Low => "Low",
            Energy::Rising => "Rising",
            Energy::High => "High",
            Energy::Declining => "Declining",
        }
    }
}

impl fmt::Display for Energy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mood forecast for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Variable,
    Positive,
    Confident,
    Sensitive,
}

impl Mood {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Mood::Variable => "Variable",
            Mood::Positive => "Positive",
            Mood::Confident => "Confident",
            Mood::Sensitive => "Sensitive",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
