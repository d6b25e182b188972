//! Append-only record of consent changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cyclesync_types::{DataSharing, Partner, PartnerId, PersonName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConsentEvent {
    InviteSent,
    Granted,
    Revoked,
    SharingChanged { sharing: DataSharing },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentLogEntry {
    pub partner_id: PartnerId,
    /// Name at the time of the change, so history survives partner removal.
    pub partner_name: PersonName,
    pub event: ConsentEvent,
    pub at: DateTime<Utc>,
}

/// Consent history in the order changes happened.
///
/// A disabled log drops new entries but keeps what it already holds.
#[derive(Debug, Clone)]
pub struct ConsentLog {
    entries: Vec<ConsentLogEntry>,
    enabled: bool,
}

impl Default for ConsentLog {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConsentLog {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: Vec::new(),
            enabled,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[ConsentLogEntry] {
        &self.entries
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, ConsentLogEntry> {
        self.entries.iter()
    }

    pub fn for_partner(&self, id: PartnerId) -> impl Iterator<Item = &ConsentLogEntry> {
        self.entries.iter().filter(move |entry| entry.partner_id == id)
    }

    pub fn record(&mut self, partner: &Partner, event: ConsentEvent, at: DateTime<Utc>) {
        if !self.enabled {
            return;
        }
        self.entries.push(ConsentLogEntry {
            partner_id: partner.id(),
            partner_name: partner.name().clone(),
            event,
            at,
        });
    }

    /// Re-append an entry from an earlier export. Kept even when logging is off.
    pub fn push_restored(&mut self, entry: ConsentLogEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a ConsentLog {
    type Item = &'a ConsentLogEntry;
    type IntoIter = std::slice::Iter<'a, ConsentLogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
