//! Application state owned by the host.
//!
//! One `AppState` per signed-in user. All mutation goes through `&mut self`, so
//! a host sharing it between handlers wraps it in a single `Mutex` and
//! concurrent adds cannot lose updates.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};

use cyclesync_config::CycleSyncConfig;
use cyclesync_types::{
    CycleLength, DataSharing, NotificationId, NotificationSettings, Partner, PartnerId,
    Relationship, User, UserId,
};

use crate::account::{AccountSnapshot, AccountStorage};
use crate::advisory::{Notification, advisories};
use crate::consent::{self, CycleView, Viewer};
use crate::consent_log::{ConsentEvent, ConsentLog};
use crate::engine::{CalendarDay, phase_calendar};
use crate::errors::CoreError;
use crate::store::PartnerStore;

#[derive(Debug, Clone)]
pub struct AppState {
    user: User,
    partners: PartnerStore,
    consent_log: ConsentLog,
    settings: NotificationSettings,
    default_cycle_length: CycleLength,
    next_notification_id: u64,
}

impl AppState {
    #[must_use]
    pub fn new(user: User) -> Self {
        Self {
            user,
            partners: PartnerStore::new(),
            consent_log: ConsentLog::default(),
            settings: NotificationSettings::default(),
            default_cycle_length: CycleLength::DEFAULT,
            next_notification_id: 1,
        }
    }

    /// Apply the `[cycle]`, `[notifications]` and `[privacy]` sections.
    ///
    /// Fails if the configured default cycle length is out of range.
    pub fn with_config(user: User, config: &CycleSyncConfig) -> Result<Self, CoreError> {
        Ok(Self {
            consent_log: ConsentLog::new(config.consent_logging()),
            settings: config.notification_settings(),
            default_cycle_length: config.default_cycle_length()?,
            ..Self::new(user)
        })
    }

    /// Resume from an export, keeping partner ids and consent history.
    pub fn restore(
        snapshot: AccountSnapshot,
        config: &CycleSyncConfig,
    ) -> Result<Self, CoreError> {
        let mut state = Self::with_config(snapshot.user, config)?;
        state.partners = PartnerStore::from_partners(snapshot.partners)?;
        for entry in snapshot.consent_log {
            state.consent_log.push_restored(entry);
        }
        Ok(state)
    }

    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub fn partners(&self) -> &PartnerStore {
        &self.partners
    }

    #[must_use]
    pub fn consent_log(&self) -> &ConsentLog {
        &self.consent_log
    }

    #[must_use]
    pub fn settings(&self) -> NotificationSettings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: NotificationSettings) {
        self.settings = settings;
    }

    /// The partner featured on the dashboard, if any have been added.
    #[must_use]
    pub fn active_partner(&self) -> Option<&Partner> {
        self.partners.first()
    }

    // ------------------------------------------------------------------
    // Partner list
    // ------------------------------------------------------------------

    /// Add a partner and log the consent invite that goes out with it.
    pub fn add_partner(
        &mut self,
        name: &str,
        relationship: Relationship,
        now: DateTime<Utc>,
    ) -> Result<PartnerId, CoreError> {
        let partner = self.partners.add(name, relationship, now)?;
        self.consent_log.record(partner, ConsentEvent::InviteSent, now);
        Ok(partner.id())
    }

    pub fn remove_partner(&mut self, id: PartnerId) -> Option<Partner> {
        self.partners.remove(id)
    }

    pub fn set_cycle(
        &mut self,
        id: PartnerId,
        start_date: NaiveDate,
        length_days: u32,
    ) -> Result<(), CoreError> {
        self.partners.set_cycle(id, start_date, length_days)
    }

    /// Record a period start using the configured default cycle length.
    pub fn set_cycle_start(
        &mut self,
        id: PartnerId,
        start_date: NaiveDate,
    ) -> Result<(), CoreError> {
        let days = self.default_cycle_length.days();
        self.partners.set_cycle(id, start_date, days)
    }

    pub fn clear_cycle(&mut self, id: PartnerId) -> Result<(), CoreError> {
        self.partners.clear_cycle(id)
    }

    // ------------------------------------------------------------------
    // Consent
    // ------------------------------------------------------------------

    /// Record a consent confirmation received from outside the core.
    pub fn grant_consent(&mut self, id: PartnerId, at: DateTime<Utc>) -> Result<(), CoreError> {
        let partner = self.partners.get_mut(id)?;
        let event = consent::grant_consent(partner, at);
        Self::log_change(&mut self.consent_log, partner, event, at);
        Ok(())
    }

    pub fn request_consent(&mut self, id: PartnerId, now: DateTime<Utc>) -> Result<(), CoreError> {
        let partner = self.partners.get_mut(id)?;
        let event = consent::request_consent(partner, now);
        Self::log_change(&mut self.consent_log, partner, event, now);
        Ok(())
    }

    pub fn revoke_consent(&mut self, id: PartnerId, now: DateTime<Utc>) -> Result<(), CoreError> {
        let partner = self.partners.get_mut(id)?;
        let event = consent::revoke_consent(partner);
        Self::log_change(&mut self.consent_log, partner, event, now);
        Ok(())
    }

    pub fn set_data_sharing(
        &mut self,
        id: PartnerId,
        sharing: DataSharing,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        let partner = self.partners.get_mut(id)?;
        let event = consent::update_sharing(partner, sharing);
        Self::log_change(&mut self.consent_log, partner, event, now);
        Ok(())
    }

    fn log_change(
        log: &mut ConsentLog,
        partner: &Partner,
        event: Option<ConsentEvent>,
        at: DateTime<Utc>,
    ) {
        let Some(event) = event else {
            return;
        };
        tracing::info!(partner_id = %partner.id(), event = ?event, "Consent changed");
        log.record(partner, event, at);
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// The view of one partner's cycle that `viewer` may see.
    pub fn cycle_view(
        &self,
        id: PartnerId,
        viewer: Viewer,
        now: DateTime<Utc>,
    ) -> Result<CycleView, CoreError> {
        let partner = self.partners.get(id)?;
        Ok(consent::cycle_view(partner, viewer, now)?)
    }

    /// Upcoming phases for the partner's own calendar.
    pub fn calendar(
        &self,
        id: PartnerId,
        from: NaiveDate,
        days: u32,
    ) -> Result<Vec<CalendarDay>, CoreError> {
        let partner = self.partners.get(id)?;
        match partner.cycle() {
            Some(profile) => Ok(phase_calendar(profile, from, days)?),
            None => Ok(Vec::new()),
        }
    }

    /// Advisories for every partner whose shared data supports one.
    ///
    /// Partners whose stored start date lies after `now` are skipped with a warning
    /// rather than failing the whole batch.
    pub fn notifications(&mut self, now: DateTime<Utc>) -> Vec<Notification> {
        let mut out = Vec::new();
        for partner in self.partners.list() {
            let view = match consent::cycle_view(partner, Viewer::Tracker, now) {
                Ok(CycleView::Shared(view)) => view,
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!(partner_id = %partner.id(), "Skipping advisories: {err}");
                    continue;
                }
            };
            for advisory in advisories(partner.name(), &view, self.settings) {
                let id = NotificationId::new(self.next_notification_id);
                self.next_notification_id += 1;
                out.push(advisory.stamp(id, partner.id(), now));
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // Account
    // ------------------------------------------------------------------

    pub fn export_all(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<AccountSnapshot, CoreError> {
        self.ensure_user(user_id)?;
        tracing::info!(user_id = %user_id, partners = self.partners.len(), "Exporting account");
        Ok(AccountSnapshot {
            user: self.user.clone(),
            partners: self.partners.list().to_vec(),
            consent_log: self.consent_log.entries().to_vec(),
            exported_at: now,
        })
    }

    /// Export and hand the snapshot to `storage`.
    pub fn export_to(
        &self,
        storage: &dyn AccountStorage,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<PathBuf, CoreError> {
        let snapshot = self.export_all(user_id, now)?;
        storage.save_export(&snapshot)
    }

    /// Drop every partner and all consent history, locally and in `storage`.
    pub fn delete_account(
        &mut self,
        storage: &dyn AccountStorage,
        user_id: UserId,
    ) -> Result<(), CoreError> {
        self.ensure_user(user_id)?;
        storage.delete(user_id)?;
        self.partners.clear();
        self.consent_log.clear();
        tracing::info!(user_id = %user_id, "Deleted account data");
        Ok(())
    }

    fn ensure_user(&self, user_id: UserId) -> Result<(), CoreError> {
        if self.user.id == user_id {
            Ok(())
        } else {
            Err(CoreError::UserNotFound(user_id))
        }
    }
}
