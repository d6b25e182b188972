//! Cycle phase inference.
//!
//! Pure functions only: the reference instant is always passed in, never read
//! from the system clock. Phase boundaries are fixed days of a 28-day template
//! laid over the actual cycle length:
//!
//! | cycle day | phase |
//! |---|---|
//! | 1..=5 | Menstruation |
//! | 6..=13 | Follicular |
//! | 14 | Ovulation |
//! | 15..=length | Luteal |

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use thiserror::Error;

use cyclesync_types::{CycleLength, CycleProfile, Energy, Mood, Phase};

const SECONDS_PER_DAY: i64 = 86_400;
const MENSTRUATION_LAST_DAY: u32 = 5;
const OVULATION_DAY: u32 = 14;

/// Upper bound on a single calendar forecast request.
pub const MAX_CALENDAR_DAYS: u32 = 366;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("cycle start {start} is after the reference date {reference}")]
    InvalidDateRange {
        start: NaiveDate,
        reference: NaiveDate,
    },
    #[error(
        "cycle length must be between {} and {} days (got {days})",
        CycleLength::MIN,
        CycleLength::MAX
    )]
    InvalidCycleLength { days: u32 },
    #[error("calendar forecast is limited to {MAX_CALENDAR_DAYS} days (got {days})")]
    CalendarTooLong { days: u32 },
}

/// Point-in-cycle state for one reference date. Derived on every read, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclePhaseState {
    /// The UTC calendar date the state was computed for.
    pub date: NaiveDate,
    pub cycle_day: u32,
    pub cycle_length: u32,
    pub phase: Phase,
    pub phase_day: u32,
    pub next_phase: Phase,
    pub days_to_next: u32,
    pub energy: Energy,
    pub mood: Mood,
    pub support_tips: [&'static str; 4],
}

impl CyclePhaseState {
    /// Days until the next ovulation day; zero on the ovulation day itself.
    #[must_use]
    pub fn days_until_ovulation(&self) -> u32 {
        if self.cycle_day <= OVULATION_DAY {
            OVULATION_DAY - self.cycle_day
        } else {
            self.cycle_length - self.cycle_day + OVULATION_DAY
        }
    }

    /// First day of the next predicted period.
    #[must_use]
    pub fn next_period_start(&self) -> NaiveDate {
        let remaining = u64::from(self.cycle_length - self.cycle_day + 1);
        self.date
            .checked_add_days(Days::new(remaining))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Static forecast attached to every day of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTraits {
    pub energy: Energy,
    pub mood: Mood,
    /// Display order matters.
    pub support_tips: [&'static str; 4],
}

#[must_use]
pub const fn phase_traits(phase: Phase) -> PhaseTraits {
    match phase {
        Phase::Menstruation => PhaseTraits {
            energy: Energy::Low,
            mood: Mood::Variable,
            support_tips: [
                "Offer comfort items like heating pads or warm tea",
                "Be understanding of mood changes",
                "Suggest gentle activities or rest time",
                "Stock up on her preferred menstrual products",
            ],
        },
        Phase::Follicular => PhaseTraits {
            energy: Energy::Rising,
            mood: Mood::Positive,
            support_tips: [
                "Great time for planning activities together",
                "Energy levels are increasing - suggest active dates",
                "Support new projects or goals she mentions",
                "Show appreciation for her positive energy",
            ],
        },
        Phase::Ovulation => PhaseTraits {
            energy: Energy::High,
            mood: Mood::Confident,
            support_tips: [
                "Peak energy time - great for adventures",
                "She may feel more social and outgoing",
                "Support any important conversations or decisions",
                "Appreciate her confidence and vitality",
            ],
        },
        Phase::Luteal => PhaseTraits {
            energy: Energy::Declining,
            mood: Mood::Sensitive,
            support_tips: [
                "Practice extra patience and understanding",
                "Offer emotional support and listening",
                "Help with stress management",
                "Prepare for upcoming period needs",
            ],
        },
    }
}

/// Compute the phase state from raw inputs.
///
/// `cycle_length` is validated here. Callers holding a [`CycleProfile`] should
/// use [`compute_phase_for`].
pub fn compute_phase(
    reference: DateTime<Utc>,
    cycle_start: NaiveDate,
    cycle_length: u32,
) -> Result<CyclePhaseState, CycleError> {
    let length = CycleLength::new(cycle_length)
        .map_err(|_| CycleError::InvalidCycleLength { days: cycle_length })?;
    compute_phase_for(reference, CycleProfile::new(cycle_start, length))
}

/// Compute the phase state for an already validated profile.
pub fn compute_phase_for(
    reference: DateTime<Utc>,
    profile: CycleProfile,
) -> Result<CyclePhaseState, CycleError> {
    let elapsed = days_since_start(reference, profile.start_date);
    if elapsed < 0 {
        return Err(CycleError::InvalidDateRange {
            start: profile.start_date,
            reference: reference.date_naive(),
        });
    }

    let length = profile.length.days();
    let cycle_day = elapsed.rem_euclid(i64::from(length)) as u32 + 1;
    let (phase, phase_day, days_to_next) = locate(cycle_day, length);
    let traits = phase_traits(phase);

    Ok(CyclePhaseState {
        date: reference.date_naive(),
        cycle_day,
        cycle_length: length,
        phase,
        phase_day,
        next_phase: phase.next(),
        days_to_next,
        energy: traits.energy,
        mood: traits.mood,
        support_tips: traits.support_tips,
    })
}

/// One day of a forward-looking phase calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub cycle_day: u32,
    pub phase: Phase,
}

/// Predict the phase for each of `days` consecutive dates starting at `from`.
pub fn phase_calendar(
    profile: CycleProfile,
    from: NaiveDate,
    days: u32,
) -> Result<Vec<CalendarDay>, CycleError> {
    if days > MAX_CALENDAR_DAYS {
        return Err(CycleError::CalendarTooLong { days });
    }

    let mut calendar = Vec::with_capacity(days as usize);
    for offset in 0..days {
        let Some(date) = from.checked_add_days(Days::new(u64::from(offset))) else {
            break;
        };
        let state = compute_phase_for(start_of_day(date), profile)?;
        calendar.push(CalendarDay {
            date,
            cycle_day: state.cycle_day,
            phase: state.phase,
        });
    }
    Ok(calendar)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Whole days elapsed, floored, so an instant before midnight of the start
/// date counts as day -1 rather than 0.
fn days_since_start(reference: DateTime<Utc>, start: NaiveDate) -> i64 {
    (reference - start_of_day(start))
        .num_seconds()
        .div_euclid(SECONDS_PER_DAY)
}

/// Map a cycle day to `(phase, phase_day, days_to_next)`.
///
/// Requires `1 <= cycle_day <= length` and `length >= CycleLength::MIN`.
fn locate(cycle_day: u32, length: u32) -> (Phase, u32, u32) {
    match cycle_day {
        1..=MENSTRUATION_LAST_DAY => (
            Phase::Menstruation,
            cycle_day,
            MENSTRUATION_LAST_DAY + 1 - cycle_day,
        ),
        6..OVULATION_DAY => (
            Phase::Follicular,
            cycle_day - MENSTRUATION_LAST_DAY,
            OVULATION_DAY - cycle_day,
        ),
        OVULATION_DAY => (Phase::Ovulation, 1, 1),
        _ => (
            Phase::Luteal,
            cycle_day - OVULATION_DAY,
            length - cycle_day + 1,
        ),
    }
}
