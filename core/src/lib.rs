//! Core domain logic for CycleSync.
//!
//! - [`engine`]: pure cycle phase inference from a start date and cycle length.
//! - [`consent`]: the visibility policy and the gated views handed to trackers.
//! - [`PartnerStore`] and [`AppState`]: the single owned mutation point for the
//!   partner list, consent changes, and account export/deletion.
//! - [`advisory`]: notification text built from what a partner shares.

pub mod account;
pub mod advisory;
pub mod consent;
mod consent_log;
pub mod engine;
mod errors;
mod state;
mod store;

pub use account::{AccountSnapshot, AccountStorage, FileAccountStorage};
pub use advisory::{Advisory, Notification, NotificationKind, Priority, advisory_message};
pub use consent::{CycleView, Shared, SharedCycleView, Viewer, is_visible, share};
pub use consent_log::{ConsentEvent, ConsentLog, ConsentLogEntry};
pub use engine::{
    CalendarDay, CycleError, CyclePhaseState, compute_phase, compute_phase_for, phase_calendar,
};
pub use errors::CoreError;
pub use state::AppState;
pub use store::PartnerStore;
