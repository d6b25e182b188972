//! Shared test utilities and fixtures

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use cyclesync_core::AppState;
use cyclesync_types::{PersonName, User, UserId};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn alex() -> User {
    User {
        id: UserId::new(1),
        name: PersonName::new("Alex Johnson").unwrap(),
        email: "alex@example.com".to_string(),
    }
}

pub fn app() -> AppState {
    AppState::new(alex())
}
