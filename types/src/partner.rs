//! Partner and user records.
//!
//! Fields are private so the consent and invite states can only move along
//! their allowed transitions. Every transition reports whether it changed
//! anything, which lets callers log real changes and skip idempotent no-ops.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CycleProfile, DataSharing, PartnerId, PersonName, Relationship, UserId};

/// Whether the person has confirmed sharing with the tracking user.
///
/// Confirmation arrives out of band; the core only records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Consent {
    #[default]
    Pending,
    Granted {
        #[serde(rename = "consentDate")]
        since: DateTime<Utc>,
    },
}

impl Consent {
    #[must_use]
    pub const fn is_granted(&self) -> bool {
        matches!(self, Consent::Granted { .. })
    }
}

/// Provenance of the consent request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Invite {
    #[default]
    NotSent,
    Sent {
        #[serde(rename = "inviteDate")]
        date: DateTime<Utc>,
    },
}

impl Invite {
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Invite::Sent { .. })
    }

    #[must_use]
    pub const fn date(&self) -> Option<DateTime<Utc>> {
        match self {
            Invite::NotSent => None,
            Invite::Sent { date } => Some(*date),
        }
    }
}

/// A person whose cycle the tracking user follows, with their consent state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    id: PartnerId,
    name: PersonName,
    relationship: Relationship,
    consent: Consent,
    invite: Invite,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cycle: Option<CycleProfile>,
    #[serde(default)]
    data_sharing: DataSharing,
}

impl Partner {
    /// A freshly invited partner: consent pending, nothing shared, no cycle data.
    #[must_use]
    pub fn invited(
        id: PartnerId,
        name: PersonName,
        relationship: Relationship,
        invited_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            relationship,
            consent: Consent::Pending,
            invite: Invite::Sent { date: invited_at },
            cycle: None,
            data_sharing: DataSharing::none(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> PartnerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &PersonName {
        &self.name
    }

    #[must_use]
    pub const fn relationship(&self) -> Relationship {
        self.relationship
    }

    #[must_use]
    pub const fn consent(&self) -> Consent {
        self.consent
    }

    #[must_use]
    pub const fn consent_granted(&self) -> bool {
        self.consent.is_granted()
    }

    #[must_use]
    pub const fn invite(&self) -> Invite {
        self.invite
    }

    #[must_use]
    pub const fn invite_sent(&self) -> bool {
        self.invite.is_sent()
    }

    #[must_use]
    pub const fn cycle(&self) -> Option<CycleProfile> {
        self.cycle
    }

    #[must_use]
    pub const fn data_sharing(&self) -> DataSharing {
        self.data_sharing
    }

    /// Record an external consent confirmation. Returns `false` if already granted.
    pub fn grant_consent(&mut self, at: DateTime<Utc>) -> bool {
        if self.consent.is_granted() {
            return false;
        }
        self.consent = Consent::Granted { since: at };
        true
    }

    /// Re-issue the consent invite. No-op once consent is granted.
    pub fn request_consent(&mut self, now: DateTime<Utc>) -> bool {
        if self.consent.is_granted() {
            return false;
        }
        self.invite = Invite::Sent { date: now };
        true
    }

    /// Withdraw consent and drop every sharing flag.
    ///
    /// A later re-grant starts from nothing shared.
    pub fn revoke_consent(&mut self) -> bool {
        if !self.consent.is_granted() {
            return false;
        }
        self.consent = Consent::Pending;
        self.data_sharing = DataSharing::none();
        true
    }

    pub fn set_data_sharing(&mut self, sharing: DataSharing) -> bool {
        if self.data_sharing == sharing {
            return false;
        }
        self.data_sharing = sharing;
        true
    }

    pub fn set_cycle(&mut self, cycle: Option<CycleProfile>) {
        self.cycle = cycle;
    }
}

/// The tracking user who owns the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: PersonName,
    pub email: String,
}
