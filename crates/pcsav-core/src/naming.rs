//! Career directory names.
//!
//! A career directory carries its identity in its name:
//!
//! ```text
//! {Name}_{origin}{reputation}_{Class}_{DDMMYY}_{fingerprint}
//! Shepard_31_Soldier_150313_1A2B3C4
//! ```
//!
//! Decoding never fails loudly: anything that does not fit the layout is
//! reported as `None` and callers fall back to the raw directory name.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::model::{Origin, PlayerClass, Reputation};

/// Token written in place of a class identifier with no known mapping.
pub const UNKNOWN_CLASS: &str = "Unknown";

const FINGERPRINT_LEN: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareerNameToken {
    pub raw_name: String,
    pub origin: Origin,
    pub reputation: Reputation,
    pub class: PlayerClass,
    pub created_on: NaiveDate,
    pub fingerprint: String,
}

impl CareerNameToken {
    pub fn encode(&self) -> String {
        format!(
            "{}_{}{}_{}_{}_{}",
            filter_name(&self.raw_name),
            self.origin.digit(),
            self.reputation.digit(),
            self.class.name(),
            date_token(self.created_on),
            self.fingerprint
        )
    }
}

impl fmt::Display for CareerNameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

pub fn decode(name: &str) -> Option<CareerNameToken> {
    let parts: Vec<&str> = name.split('_').collect();
    let [raw, codes, class, date, fingerprint] = parts.as_slice() else {
        return None;
    };

    let mut codes = codes.chars();
    let (Some(o), Some(r), None) = (codes.next(), codes.next(), codes.next()) else {
        return None;
    };
    let origin = Origin::from_digit(o)?;
    let reputation = Reputation::from_digit(r)?;

    let class: PlayerClass = class.parse().ok()?;
    let created_on = parse_date_token(date)?;

    if fingerprint.chars().count() != FINGERPRINT_LEN {
        return None;
    }

    Some(CareerNameToken {
        raw_name: (*raw).to_string(),
        origin,
        reputation,
        class,
        created_on,
        fingerprint: (*fingerprint).to_string(),
    })
}

/// Build a career directory name for a new career created on `today`.
pub fn encode(
    name: &str,
    origin: Origin,
    reputation: Reputation,
    class_id: i32,
    fingerprint: &[u8],
    today: NaiveDate,
) -> String {
    format!(
        "{}_{}{}_{}_{}_{}",
        filter_name(name),
        origin.digit(),
        reputation.digit(),
        class_token(class_id),
        date_token(today),
        fingerprint_token(fingerprint)
    )
}

pub fn class_token(class_id: i32) -> &'static str {
    PlayerClass::from_class_id(class_id)
        .map(PlayerClass::name)
        .unwrap_or(UNKNOWN_CLASS)
}

/// Keep ASCII letters only.
pub fn filter_name(name: &str) -> String {
    name.chars().filter(char::is_ascii_alphabetic).collect()
}

/// First seven hex digits of the identity bytes, zero-padded when short.
fn fingerprint_token(bytes: &[u8]) -> String {
    let hex: String = bytes.iter().map(|b| format!("{:02X}", b)).collect();
    format!("{:0<width$.width$}", hex, width = FINGERPRINT_LEN)
}

fn date_token(date: NaiveDate) -> String {
    format!(
        "{:02}{:02}{:02}",
        date.day(),
        date.month(),
        date.year().rem_euclid(100)
    )
}

fn parse_date_token(s: &str) -> Option<NaiveDate> {
    if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let day: u32 = s[0..2].parse().ok()?;
    let month: u32 = s[2..4].parse().ok()?;
    let year: i32 = s[4..6].parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month, day)
}
