//! In-memory partner collection.
//!
//! Display order is insertion order. Ids are handed out monotonically and never
//! reused, even after removal. Once `u64::MAX` has been assigned, `add` fails.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};

use cyclesync_types::{
    CycleLength, CycleProfile, Partner, PartnerId, PersonName, Relationship, ValidationError,
};

use crate::errors::CoreError;

#[derive(Debug, Clone)]
pub struct PartnerStore {
    partners: Vec<Partner>,
    /// `None` once the id space is used up.
    next_id: Option<PartnerId>,
}

impl Default for PartnerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PartnerStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            partners: Vec::new(),
            next_id: Some(PartnerId::new(1)),
        }
    }

    /// Rebuild a store from previously exported partners, keeping their ids.
    ///
    /// Fails if two partners share an id.
    pub fn from_partners(partners: Vec<Partner>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(partners.len());
        if let Some(duplicate) = partners.iter().map(Partner::id).find(|id| !seen.insert(*id)) {
            tracing::warn!(partner_id = %duplicate, "Rejected restore with duplicate partner id");
            return Err(ValidationError::DuplicatePartnerId(duplicate));
        }

        let next_id = match partners.iter().map(Partner::id).max() {
            Some(highest) => highest.checked_next(),
            None => Some(PartnerId::new(1)),
        };
        Ok(Self { partners, next_id })
    }

    /// Add a partner and issue their consent invite.
    pub fn add(
        &mut self,
        name: &str,
        relationship: Relationship,
        now: DateTime<Utc>,
    ) -> Result<&Partner, ValidationError> {
        let name = PersonName::new(name)?;
        let id = self.next_id.ok_or(ValidationError::PartnerIdsExhausted)?;
        self.next_id = id.checked_next();
        self.partners.push(Partner::invited(id, name, relationship, now));
        tracing::info!(partner_id = %id, relationship = %relationship, "Added partner");
        Ok(&self.partners[self.partners.len() - 1])
    }

    #[inline]
    #[must_use]
    pub fn list(&self) -> &[Partner] {
        &self.partners
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.partners.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    /// The partner shown on the dashboard: the first one added.
    #[must_use]
    pub fn first(&self) -> Option<&Partner> {
        self.partners.first()
    }

    pub fn get(&self, id: PartnerId) -> Result<&Partner, CoreError> {
        self.partners
            .iter()
            .find(|partner| partner.id() == id)
            .ok_or(CoreError::PartnerNotFound(id))
    }

    pub fn get_mut(&mut self, id: PartnerId) -> Result<&mut Partner, CoreError> {
        self.partners
            .iter_mut()
            .find(|partner| partner.id() == id)
            .ok_or(CoreError::PartnerNotFound(id))
    }

    /// Remove by id. Unknown ids are ignored.
    pub fn remove(&mut self, id: PartnerId) -> Option<Partner> {
        let index = self.partners.iter().position(|partner| partner.id() == id)?;
        let removed = self.partners.remove(index);
        tracing::info!(partner_id = %id, "Removed partner");
        Some(removed)
    }

    /// Record the most recent period start and the cycle length.
    pub fn set_cycle(
        &mut self,
        id: PartnerId,
        start_date: NaiveDate,
        length_days: u32,
    ) -> Result<(), CoreError> {
        let length = CycleLength::new(length_days).inspect_err(|_| {
            tracing::warn!(partner_id = %id, length_days, "Rejected cycle length");
        })?;
        let partner = self.get_mut(id)?;
        partner.set_cycle(Some(CycleProfile::new(start_date, length)));
        tracing::debug!(partner_id = %id, "Updated cycle profile");
        Ok(())
    }

    pub fn clear_cycle(&mut self, id: PartnerId) -> Result<(), CoreError> {
        self.get_mut(id)?.set_cycle(None);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.partners.clear();
    }
}
