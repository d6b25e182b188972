use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A derived attribute whose exposure a person controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SharedField {
    CyclePhase,
    Mood,
    Energy,
    Ovulation,
}

impl SharedField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SharedField::CyclePhase => "cyclePhase",
            SharedField::Mood => "mood",
            SharedField::Energy => "energy",
            SharedField::Ovulation => "ovulation",
        }
    }

    #[must_use]
    pub fn all() -> &'static [SharedField] {
        &[
            SharedField::CyclePhase,
            SharedField::Mood,
            SharedField::Energy,
            SharedField::Ovulation,
        ]
    }
}

impl FromStr for SharedField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        SharedField::all()
            .iter()
            .copied()
            .find(|field| field.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown shared field: {trimmed}"))
    }
}

impl fmt::Display for SharedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field sharing flags. Each flag independently gates one derived field.
///
/// Flags only matter once consent is granted; see `Partner::consent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSharing {
    #[serde(default)]
    pub cycle_phase: bool,
    #[serde(default)]
    pub mood: bool,
    #[serde(default)]
    pub energy: bool,
    #[serde(default)]
    pub ovulation: bool,
}

impl DataSharing {
    /// Nothing shared. The state of every newly added person.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            cycle_phase: false,
            mood: false,
            energy: false,
            ovulation: false,
        }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            cycle_phase: true,
            mood: true,
            energy: true,
            ovulation: true,
        }
    }

    #[must_use]
    pub const fn allows(&self, field: SharedField) -> bool {
        match field {
            SharedField::CyclePhase => self.cycle_phase,
            SharedField::Mood => self.mood,
            SharedField::Energy => self.energy,
            SharedField::Ovulation => self.ovulation,
        }
    }

    #[must_use]
    pub const fn with(mut self, field: SharedField, enabled: bool) -> Self {
        match field {
            SharedField::CyclePhase => self.cycle_phase = enabled,
            SharedField::Mood => self.mood = enabled,
            SharedField::Energy => self.energy = enabled,
            SharedField::Ovulation => self.ovulation = enabled,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSharing, SharedField};

    #[test]
    fn flags_are_independent() {
        let sharing = DataSharing::none().with(SharedField::Mood, true);
        assert!(sharing.allows(SharedField::Mood));
        assert!(!sharing.allows(SharedField::CyclePhase));
        assert!(!sharing.allows(SharedField::Energy));
        assert!(!sharing.allows(SharedField::Ovulation));
    }

    #[test]
    fn default_shares_nothing() {
        let sharing = DataSharing::default();
        assert!(SharedField::all().iter().all(|f| !sharing.allows(*f)));
        assert_eq!(sharing, DataSharing::none());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(DataSharing::all().with(SharedField::Ovulation, false))
            .unwrap();
        assert_eq!(json["cyclePhase"], true);
        assert_eq!(json["ovulation"], false);
    }

    #[test]
    fn field_parses_from_wire_name() {
        assert_eq!("mood".parse::<SharedField>(), Ok(SharedField::Mood));
        assert_eq!("cyclePhase".parse::<SharedField>(), Ok(SharedField::CyclePhase));
        assert!("weight".parse::<SharedField>().is_err());
    }
}
