use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

/// Which advisories the tracking user wants to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NotificationSettings {
    /// Phase-appropriate support tips.
    #[serde(default = "default_true")]
    pub support_reminders: bool,
    /// Heads-up the day before a phase changes.
    #[serde(default)]
    pub phase_changes: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            support_reminders: true,
            phase_changes: false,
        }
    }
}
