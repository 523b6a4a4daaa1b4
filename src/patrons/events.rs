use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::{BookId, LibraryBranchId, PatronId};
use crate::core::library::BookType;
use crate::utils::date::{opt_serializer, serializer};

pub const BOOK_PLACED_ON_HOLD: &str = "book_placed_on_hold";
pub const BOOK_HOLD_FAILED: &str = "book_hold_failed";
pub const MAXIMUM_NUMBER_OF_HOLDS_REACHED: &str = "maximum_number_of_holds_reached";

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BookPlacedOnHold {
    pub event_id: String,
    #[serde(with = "serializer")]
    pub when: NaiveDateTime,
    pub patron_id: PatronId,
    pub book_id: BookId,
    pub book_type: BookType,
    pub library_branch_id: LibraryBranchId,
    #[serde(with = "serializer")]
    pub hold_from: NaiveDateTime,
    #[serde(default, with = "opt_serializer")]
    pub hold_till: Option<NaiveDateTime>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MaximumNumberOfHoldsReached {
    pub event_id: String,
    #[serde(with = "serializer")]
    pub when: NaiveDateTime,
    pub patron_id: PatronId,
    pub number_of_holds: usize,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BookHoldFailed {
    pub event_id: String,
    #[serde(with = "serializer")]
    pub when: NaiveDateTime,
    pub reason: String,
    pub patron_id: PatronId,
    pub book_id: BookId,
    pub library_branch_id: LibraryBranchId,
}

impl BookHoldFailed {
    pub fn now(reason: &str, when: NaiveDateTime, patron_id: &PatronId,
               book_id: &BookId, library_branch_id: &LibraryBranchId) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            when,
            reason: reason.to_string(),
            patron_id: patron_id.clone(),
            book_id: book_id.clone(),
            library_branch_id: library_branch_id.clone(),
        }
    }
}

// BookPlacedOnHoldEvents is everything that happened when a hold was accepted:
// always the hold itself, plus the limit notice when this hold used the last slot.
// version is the patron version the decision was made against.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BookPlacedOnHoldEvents {
    pub patron_id: PatronId,
    #[serde(default)]
    pub version: i64,
    pub book_placed_on_hold: BookPlacedOnHold,
    pub maximum_number_of_holds_reached: Option<MaximumNumberOfHoldsReached>,
}

impl BookPlacedOnHoldEvents {
    pub fn events(book_placed_on_hold: BookPlacedOnHold, version: i64) -> Self {
        Self {
            patron_id: book_placed_on_hold.patron_id.clone(),
            version,
            book_placed_on_hold,
            maximum_number_of_holds_reached: None,
        }
    }

    pub fn and(mut self, reached: MaximumNumberOfHoldsReached) -> Self {
        self.maximum_number_of_holds_reached = Some(reached);
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names = vec![BOOK_PLACED_ON_HOLD];
        if self.maximum_number_of_holds_reached.is_some() {
            names.push(MAXIMUM_NUMBER_OF_HOLDS_REACHED);
        }
        names
    }
}
