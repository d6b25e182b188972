//! Consent policy and the read-boundary gate.
//!
//! Anything derived from a partner's cycle reaches a tracking user only as a
//! [`SharedCycleView`], and the only way to build one is [`share`], which
//! checks consent and the per-field sharing flags. A partner reading their own
//! data gets the full [`CyclePhaseState`] via [`Viewer::Owner`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, Serializer};

use cyclesync_types::{DataSharing, Energy, Mood, Partner, PartnerId, Phase, SharedField};

use crate::consent_log::ConsentEvent;
use crate::engine::{CycleError, CyclePhaseState, compute_phase_for};

/// Whether `field` may be shown to anyone other than the partner.
#[must_use]
pub fn is_visible(partner: &Partner, field: SharedField) -> bool {
    partner.consent_granted() && partner.data_sharing().allows(field)
}

/// Record the partner's external consent confirmation.
///
/// Returns the event to log, or `None` if consent was already granted.
pub fn grant_consent(partner: &mut Partner, at: DateTime<Utc>) -> Option<ConsentEvent> {
    partner.grant_consent(at).then_some(ConsentEvent::Granted)
}

/// Re-send the consent invite. A no-op once consent is granted.
pub fn request_consent(partner: &mut Partner, now: DateTime<Utc>) -> Option<ConsentEvent> {
    partner
        .request_consent(now)
        .then_some(ConsentEvent::InviteSent)
}

/// Withdraw consent. Sharing flags are reset along with it.
pub fn revoke_consent(partner: &mut Partner) -> Option<ConsentEvent> {
    partner.revoke_consent().then_some(ConsentEvent::Revoked)
}

pub fn update_sharing(partner: &mut Partner, sharing: DataSharing) -> Option<ConsentEvent> {
    partner
        .set_data_sharing(sharing)
        .then_some(ConsentEvent::SharingChanged { sharing })
}

/// A gated value: either visible to the viewer or withheld by policy.
///
/// Serializes as the inner value, or `null` when withheld.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shared<T> {
    Visible(T),
    Withheld,
}

impl<T> Shared<T> {
    fn gate(allowed: bool, value: impl FnOnce() -> T) -> Self {
        if allowed {
            Shared::Visible(value())
        } else {
            Shared::Withheld
        }
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self, Shared::Visible(_))
    }

    #[must_use]
    pub fn visible(self) -> Option<T> {
        match self {
            Shared::Visible(value) => Some(value),
            Shared::Withheld => None,
        }
    }

    #[must_use]
    pub const fn as_ref(&self) -> Shared<&T> {
        match self {
            Shared::Visible(value) => Shared::Visible(value),
            Shared::Withheld => Shared::Withheld,
        }
    }
}

impl<T: Serialize> Serialize for Shared<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Shared::Visible(value) => value.serialize(serializer),
            Shared::Withheld => serializer.serialize_none(),
        }
    }
}

/// The presentation contract for a tracking user.
///
/// Fields are private; the view can only come out of [`share`]:
///
/// ```compile_fail,E0451
/// use cyclesync_core::{Shared, SharedCycleView};
/// use cyclesync_types::PartnerId;
///
/// let view = SharedCycleView {
///     partner_id: PartnerId::new(1),
///     cycle_day: Shared::Withheld,
///     cycle_length: Shared::Withheld,
///     phase: Shared::Withheld,
///     phase_day: Shared::Withheld,
///     next_phase: Shared::Withheld,
///     days_to_next: Shared::Withheld,
///     next_period_start: Shared::Withheld,
///     support_tips: Shared::Withheld,
///     energy: Shared::Withheld,
///     mood: Shared::Withheld,
///     days_until_ovulation: Shared::Withheld,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedCycleView {
    partner_id: PartnerId,
    cycle_day: Shared<u32>,
    cycle_length: Shared<u32>,
    phase: Shared<Phase>,
    phase_day: Shared<u32>,
    next_phase: Shared<Phase>,
    days_to_next: Shared<u32>,
    next_period_start: Shared<NaiveDate>,
    support_tips: Shared<[&'static str; 4]>,
    energy: Shared<Energy>,
    mood: Shared<Mood>,
    days_until_ovulation: Shared<u32>,
}

impl SharedCycleView {
    fn withheld(partner_id: PartnerId) -> Self {
        Self {
            partner_id,
            cycle_day: Shared::Withheld,
            cycle_length: Shared::Withheld,
            phase: Shared::Withheld,
            phase_day: Shared::Withheld,
            next_phase: Shared::Withheld,
            days_to_next: Shared::Withheld,
            next_period_start: Shared::Withheld,
            support_tips: Shared::Withheld,
            energy: Shared::Withheld,
            mood: Shared::Withheld,
            days_until_ovulation: Shared::Withheld,
        }
    }

    #[must_use]
    pub const fn partner_id(&self) -> PartnerId {
        self.partner_id
    }

    #[must_use]
    pub const fn cycle_day(&self) -> Shared<u32> {
        self.cycle_day
    }

    #[must_use]
    pub const fn cycle_length(&self) -> Shared<u32> {
        self.cycle_length
    }

    #[must_use]
    pub const fn phase(&self) -> Shared<Phase> {
        self.phase
    }

    #[must_use]
    pub const fn phase_day(&self) -> Shared<u32> {
        self.phase_day
    }

    #[must_use]
    pub const fn next_phase(&self) -> Shared<Phase> {
        self.next_phase
    }

    #[must_use]
    pub const fn days_to_next(&self) -> Shared<u32> {
        self.days_to_next
    }

    #[must_use]
    pub const fn next_period_start(&self) -> Shared<NaiveDate> {
        self.next_period_start
    }

    #[must_use]
    pub const fn support_tips(&self) -> Shared<&[&'static str; 4]> {
        self.support_tips.as_ref()
    }

    #[must_use]
    pub const fn energy(&self) -> Shared<Energy> {
        self.energy
    }

    #[must_use]
    pub const fn mood(&self) -> Shared<Mood> {
        self.mood
    }

    #[must_use]
    pub const fn days_until_ovulation(&self) -> Shared<u32> {
        self.days_until_ovulation
    }

    /// True when every field is withheld.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::withheld(self.partner_id)
    }
}

/// Filter a computed state through the partner's consent and sharing flags.
#[must_use]
pub fn share(partner: &Partner, state: &CyclePhaseState) -> SharedCycleView {
    let phase = is_visible(partner, SharedField::CyclePhase);
    let energy = is_visible(partner, SharedField::Energy);
    let mood = is_visible(partner, SharedField::Mood);
    let ovulation = is_visible(partner, SharedField::Ovulation);

    SharedCycleView {
        partner_id: partner.id(),
        cycle_day: Shared::gate(phase, || state.cycle_day),
        cycle_length: Shared::gate(phase, || state.cycle_length),
        phase: Shared::gate(phase, || state.phase),
        phase_day: Shared::gate(phase, || state.phase_day),
        next_phase: Shared::gate(phase, || state.next_phase),
        days_to_next: Shared::gate(phase, || state.days_to_next),
        next_period_start: Shared::gate(phase, || state.next_period_start()),
        support_tips: Shared::gate(phase, || state.support_tips),
        energy: Shared::gate(energy, || state.energy),
        mood: Shared::gate(mood, || state.mood),
        days_until_ovulation: Shared::gate(ovulation, || state.days_until_ovulation()),
    }
}

/// Who is reading the cycle data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    /// The partner, in their own session.
    Owner,
    /// The tracking user.
    Tracker,
}

/// What a viewer receives for one partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "view", rename_all = "camelCase")]
pub enum CycleView {
    /// Consent has not been granted; nothing about the cycle is revealed.
    ConsentPending,
    /// No cycle start recorded, so the engine was not run.
    NoCycleData,
    Full(CyclePhaseState),
    Shared(SharedCycleView),
}

/// Build the view `viewer` is allowed to see.
///
/// For a tracker the engine only runs once consent is granted and at least one
/// field is shared.
pub fn cycle_view(
    partner: &Partner,
    viewer: Viewer,
    reference: DateTime<Utc>,
) -> Result<CycleView, CycleError> {
    if viewer == Viewer::Tracker && !partner.consent_granted() {
        return Ok(CycleView::ConsentPending);
    }
    let Some(profile) = partner.cycle() else {
        return Ok(CycleView::NoCycleData);
    };

    match viewer {
        Viewer::Owner => compute_phase_for(reference, profile).map(CycleView::Full),
        Viewer::Tracker => {
            let any_shared = SharedField::all()
                .iter()
                .any(|field| is_visible(partner, *field));
            if !any_shared {
                return Ok(CycleView::Shared(SharedCycleView::withheld(partner.id())));
            }
            let state = compute_phase_for(reference, profile)?;
            Ok(CycleView::Shared(share(partner, &state)))
        }
    }
}
