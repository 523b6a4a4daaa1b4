use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::{BookId, LibraryBranchId, PatronId};
use crate::core::library::LibraryResult;
use crate::patrons::domain::duration::{HoldDuration, NumberOfDays};
use crate::utils::date::serializer;

// PlaceOnHoldCommand is a single request to hold a book, consumed once by the hold service
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PlaceOnHoldCommand {
    #[serde(with = "serializer")]
    pub timestamp: NaiveDateTime,
    pub patron_id: PatronId,
    pub library_branch_id: LibraryBranchId,
    pub book_id: BookId,
    pub no_of_days: Option<NumberOfDays>,
}

impl PlaceOnHoldCommand {
    pub fn close_ended(patron_id: PatronId, library_branch_id: LibraryBranchId,
                       book_id: BookId, days: i64) -> LibraryResult<Self> {
        Ok(Self {
            timestamp: Utc::now().naive_utc(),
            patron_id,
            library_branch_id,
            book_id,
            no_of_days: Some(NumberOfDays::of(days)?),
        })
    }

    pub fn open_ended(patron_id: PatronId, library_branch_id: LibraryBranchId, book_id: BookId) -> Self {
        Self {
            timestamp: Utc::now().naive_utc(),
            patron_id,
            library_branch_id,
            book_id,
            no_of_days: None,
        }
    }

    pub fn hold_duration(&self) -> HoldDuration {
        match self.no_of_days {
            Some(days) => HoldDuration::close_ended(days),
            None => HoldDuration::open_ended(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::domain::{BookId, LibraryBranchId, PatronId};
    use crate::core::library::LibraryError;
    use crate::hold::domain::model::PlaceOnHoldCommand;
    use crate::patrons::domain::duration::{HoldDuration, NumberOfDays};

    #[tokio::test]
    async fn test_should_derive_close_ended_duration() {
        let cmd = PlaceOnHoldCommand::close_ended(
            PatronId::random(), LibraryBranchId::random(), BookId::random(), 7).expect("should build command");
        let days = NumberOfDays::of(7).expect("should build days");
        assert_eq!(HoldDuration::CloseEnded(days), cmd.hold_duration());
        assert_eq!(7, days.days());
    }

    #[tokio::test]
    async fn test_should_derive_open_ended_duration() {
        let cmd = PlaceOnHoldCommand::open_ended(PatronId::random(), LibraryBranchId::random(), BookId::random());
        assert_eq!(None, cmd.no_of_days);
        assert!(cmd.hold_duration().is_open_ended());
    }

    #[tokio::test]
    async fn test_should_reject_non_positive_days() {
        for days in [0, -3] {
            let res = PlaceOnHoldCommand::close_ended(
                PatronId::random(), LibraryBranchId::random(), BookId::random(), days);
            assert!(matches!(res, Err(LibraryError::Validation { .. })));
        }
    }
}
