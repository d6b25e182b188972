//! End-to-end checks of the documented reference scenarios.

use chrono::Duration;

use cyclesync_core::{CycleError, Viewer, compute_phase, is_visible};
use cyclesync_types::{DataSharing, Phase, Relationship, SharedField};

use crate::common::{app, at, date};

#[test]
fn cycle_start_day_is_first_menstruation_day() {
    let state = compute_phase(at(2025, 8, 10), date(2025, 8, 10), 28).unwrap();
    assert_eq!(
        (
            state.cycle_day,
            state.phase,
            state.phase_day,
            state.next_phase,
            state.days_to_next
        ),
        (1, Phase::Menstruation, 1, Phase::Follicular, 5)
    );
}

#[test]
fn thirteen_days_in_is_ovulation() {
    let state = compute_phase(at(2025, 8, 23), date(2025, 8, 10), 28).unwrap();
    assert_eq!(
        (
            state.cycle_day,
            state.phase,
            state.phase_day,
            state.next_phase,
            state.days_to_next
        ),
        (14, Phase::Ovulation, 1, Phase::Luteal, 1)
    );
}

#[test]
fn forty_days_in_wraps_to_follicular() {
    let reference = at(2025, 8, 10) + Duration::days(40);
    let state = compute_phase(reference, date(2025, 8, 10), 28).unwrap();
    assert_eq!(state.cycle_day, 13);
    assert_eq!(state.phase, Phase::Follicular);
}

#[test]
fn start_one_day_ahead_is_rejected() {
    let result = compute_phase(at(2025, 8, 9), date(2025, 8, 10), 28);
    assert!(matches!(result, Err(CycleError::InvalidDateRange { .. })));
}

#[test]
fn new_friend_shares_nothing_until_consent() {
    let mut app = app();
    let id = app
        .add_partner("Sam", Relationship::Friend, at(2025, 8, 1))
        .unwrap();
    app.set_data_sharing(
        id,
        DataSharing::none().with(SharedField::Mood, true),
        at(2025, 8, 1),
    )
    .unwrap();

    let sam = app.partners().get(id).unwrap();
    assert!(!sam.consent_granted());
    assert!(sam.invite_sent());
    assert!(sam.data_sharing().mood);
    assert!(!is_visible(sam, SharedField::Mood));

    app.set_cycle(id, date(2025, 8, 10), 28).unwrap();
    let view = app.cycle_view(id, Viewer::Tracker, at(2025, 8, 20)).unwrap();
    assert_eq!(view, cyclesync_core::CycleView::ConsentPending);
}
