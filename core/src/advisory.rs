//! Advisory text derived from a shared cycle view.
//!
//! Input is always a [`SharedCycleView`], so advisories can only mention what
//! the partner chose to share. Delivery is somebody else's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cyclesync_types::{NotificationId, NotificationSettings, PartnerId, PersonName, Phase};

use crate::consent::SharedCycleView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    Support,
    PhaseChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// An advisory before it is stamped for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub kind: NotificationKind,
    pub priority: Priority,
    pub message: String,
}

/// A stamped advisory, ready for an external notification surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub partner_id: PartnerId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub date: DateTime<Utc>,
    pub priority: Priority,
}

impl Advisory {
    #[must_use]
    pub fn stamp(
        self,
        id: NotificationId,
        partner_id: PartnerId,
        date: DateTime<Utc>,
    ) -> Notification {
        Notification {
            id,
            partner_id,
            kind: self.kind,
            message: self.message,
            date,
            priority: self.priority,
        }
    }
}

#[must_use]
pub const fn guidance(phase: Phase) -> &'static str {
    match phase {
        Phase::Menstruation => "offer comfort and be understanding of mood changes",
        Phase::Follicular => "a great time to plan activities together",
        Phase::Ovulation => "support her energy and confidence",
        Phase::Luteal => "consider extra patience and comfort",
    }
}

const fn support_priority(phase: Phase) -> Priority {
    match phase {
        Phase::Menstruation | Phase::Luteal => Priority::Medium,
        Phase::Follicular | Phase::Ovulation => Priority::Low,
    }
}

/// `"{name} is in her {phase} phase - {guidance}"`, or `None` if the phase is withheld.
#[must_use]
pub fn advisory_message(name: &PersonName, view: &SharedCycleView) -> Option<String> {
    let phase = view.phase().visible()?;
    Some(format!(
        "{name} is in her {} phase - {}",
        phase.label(),
        guidance(phase)
    ))
}

/// Every advisory the settings ask for, in delivery order.
#[must_use]
pub fn advisories(
    name: &PersonName,
    view: &SharedCycleView,
    settings: NotificationSettings,
) -> Vec<Advisory> {
    let mut out = Vec::new();
    let Some(phase) = view.phase().visible() else {
        return out;
    };

    if settings.support_reminders
        && let Some(message) = advisory_message(name, view)
    {
        out.push(Advisory {
            kind: NotificationKind::Support,
            priority: support_priority(phase),
            message,
        });
    }

    if settings.phase_changes
        && view.days_to_next().visible() == Some(1)
        && let Some(next) = view.next_phase().visible()
    {
        out.push(Advisory {
            kind: NotificationKind::PhaseChange,
            priority: Priority::Medium,
            message: format!("{name} moves into her {} phase tomorrow", next.label()),
        });
    }

    out
}
