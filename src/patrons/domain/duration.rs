use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};

/// A strictly positive number of days.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct NumberOfDays(u32);

impl NumberOfDays {
    pub fn of(days: i64) -> LibraryResult<NumberOfDays> {
        if days <= 0 {
            return Err(LibraryError::validation(
                "Cannot use negative integer or zero as number of days", Some("400".to_string())));
        }
        u32::try_from(days)
            .map(NumberOfDays)
            .map_err(|_| LibraryError::validation(format!("too many days {}", days).as_str(), Some("400".to_string())))
    }

    pub fn days(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for NumberOfDays {
    type Error = LibraryError;

    fn try_from(days: i64) -> Result<Self, Self::Error> {
        NumberOfDays::of(days)
    }
}

impl From<NumberOfDays> for i64 {
    fn from(days: NumberOfDays) -> Self {
        days.0 as i64
    }
}

impl Display for NumberOfDays {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How long a hold lasts: until the book is collected, or a fixed number of days.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum HoldDuration {
    OpenEnded,
    CloseEnded(NumberOfDays),
}

impl HoldDuration {
    pub fn open_ended() -> Self {
        HoldDuration::OpenEnded
    }

    pub fn close_ended(days: NumberOfDays) -> Self {
        HoldDuration::CloseEnded(days)
    }

    pub fn is_open_ended(&self) -> bool {
        matches!(self, HoldDuration::OpenEnded)
    }

    pub fn till(&self, from: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            HoldDuration::OpenEnded => None,
            HoldDuration::CloseEnded(days) => Some(from + Duration::days(days.days() as i64)),
        }
    }
}
