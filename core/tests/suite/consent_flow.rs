use cyclesync_core::{
    ConsentEvent, CoreError, CycleView, NotificationKind, Priority, Shared, Viewer,
};
use cyclesync_types::{
    DataSharing, NotificationSettings, PartnerId, Phase, Relationship, SharedField,
};

use crate::common::{app, at, date};

#[test]
fn grant_then_share_reveals_only_chosen_fields() {
    let mut app = app();
    let id = app
        .add_partner("Sarah", Relationship::Partner, at(2025, 8, 1))
        .unwrap();
    app.set_cycle(id, date(2025, 8, 10), 28).unwrap();
    app.grant_consent(id, at(2025, 8, 2)).unwrap();
    app.set_data_sharing(
        id,
        DataSharing::all().with(SharedField::Ovulation, false),
        at(2025, 8, 2),
    )
    .unwrap();

    let CycleView::Shared(view) = app.cycle_view(id, Viewer::Tracker, at(2025, 8, 30)).unwrap()
    else {
        panic!("expected a shared view");
    };
    assert_eq!(view.phase(), Shared::Visible(Phase::Luteal));
    assert!(view.mood().is_visible());
    assert_eq!(view.days_until_ovulation(), Shared::Withheld);
}

#[test]
fn consent_history_is_logged_once_per_change() {
    let mut app = app();
    let id = app
        .add_partner("Sarah", Relationship::Partner, at(2025, 8, 1))
        .unwrap();
    app.grant_consent(id, at(2025, 8, 2)).unwrap();
    app.grant_consent(id, at(2025, 8, 3)).unwrap();
    app.request_consent(id, at(2025, 8, 4)).unwrap();
    app.set_data_sharing(id, DataSharing::all(), at(2025, 8, 5))
        .unwrap();
    app.set_data_sharing(id, DataSharing::all(), at(2025, 8, 6))
        .unwrap();
    app.revoke_consent(id, at(2025, 8, 7)).unwrap();

    let events: Vec<_> = app.consent_log().iter().map(|entry| entry.event).collect();
    assert_eq!(
        events,
        [
            ConsentEvent::InviteSent,
            ConsentEvent::Granted,
            ConsentEvent::SharingChanged {
                sharing: DataSharing::all()
            },
            ConsentEvent::Revoked,
        ]
    );

    let sarah = app.partners().get(id).unwrap();
    assert!(!sarah.consent_granted());
    assert_eq!(sarah.data_sharing(), DataSharing::none());
}

#[test]
fn history_survives_partner_removal() {
    let mut app = app();
    let id = app
        .add_partner("Sam", Relationship::Friend, at(2025, 8, 1))
        .unwrap();
    assert!(app.remove_partner(id).is_some());
    assert!(app.remove_partner(id).is_none());

    assert_eq!(app.consent_log().len(), 1);
    assert_eq!(app.consent_log().entries()[0].partner_name.as_str(), "Sam");
}

#[test]
fn reads_on_unknown_partner_fail_loudly() {
    let mut app = app();
    let missing = PartnerId::new(42);
    assert!(matches!(
        app.cycle_view(missing, Viewer::Tracker, at(2025, 8, 1)),
        Err(CoreError::PartnerNotFound(_))
    ));
    assert!(
        app.grant_consent(missing, at(2025, 8, 1))
            .unwrap_err()
            .is_not_found()
    );
    assert!(
        app.set_cycle(missing, date(2025, 8, 1), 28)
            .unwrap_err()
            .is_not_found()
    );
}

#[test]
fn notifications_cover_shared_partners_only() {
    let mut app = app();
    app.set_settings(NotificationSettings {
        support_reminders: true,
        phase_changes: true,
    });

    let sarah = app
        .add_partner("Sarah", Relationship::Partner, at(2025, 8, 1))
        .unwrap();
    app.set_cycle(sarah, date(2025, 8, 10), 28).unwrap();
    app.grant_consent(sarah, at(2025, 8, 1)).unwrap();
    app.set_data_sharing(sarah, DataSharing::all(), at(2025, 8, 1))
        .unwrap();

    let sam = app
        .add_partner("Sam", Relationship::Friend, at(2025, 8, 1))
        .unwrap();
    app.set_cycle(sam, date(2025, 8, 10), 28).unwrap();

    // Day 14 for Sarah: a support tip plus tomorrow's change into the luteal phase.
    let notes = app.notifications(at(2025, 8, 23));
    assert_eq!(notes.len(), 2);
    assert!(notes.iter().all(|note| note.partner_id == sarah));
    assert_eq!(notes[0].kind, NotificationKind::Support);
    assert_eq!(notes[1].kind, NotificationKind::PhaseChange);
    assert_eq!(notes[1].priority, Priority::Medium);
    assert_ne!(notes[0].id, notes[1].id);

    let later = app.notifications(at(2025, 8, 24));
    assert!(later.iter().all(|note| notes.iter().all(|n| n.id != note.id)));
}

#[test]
fn notifications_skip_partner_with_future_start() {
    let mut app = app();
    let id = app
        .add_partner("Sarah", Relationship::Partner, at(2025, 8, 1))
        .unwrap();
    app.set_cycle(id, date(2025, 9, 1), 28).unwrap();
    app.grant_consent(id, at(2025, 8, 1)).unwrap();
    app.set_data_sharing(id, DataSharing::all(), at(2025, 8, 1))
        .unwrap();

    assert!(app.notifications(at(2025, 8, 20)).is_empty());
    assert!(matches!(
        app.cycle_view(id, Viewer::Owner, at(2025, 8, 20)),
        Err(CoreError::Cycle(_))
    ));
}

#[test]
fn owner_calendar_lists_upcoming_phases() {
    let mut app = app();
    let id = app
        .add_partner("Sarah", Relationship::Partner, at(2025, 8, 1))
        .unwrap();
    assert!(app.calendar(id, date(2025, 8, 10), 7).unwrap().is_empty());

    app.set_cycle(id, date(2025, 8, 10), 28).unwrap();
    let calendar = app.calendar(id, date(2025, 8, 10), 28).unwrap();
    assert_eq!(calendar.len(), 28);
    assert_eq!(calendar[0].phase, Phase::Menstruation);
    assert_eq!(calendar[13].phase, Phase::Ovulation);
    assert_eq!(calendar[27].phase, Phase::Luteal);
}
