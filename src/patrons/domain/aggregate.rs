use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use crate::books::domain::AvailableBook;
use crate::core::domain::{HoldLimits, LibraryBranchId, PatronId};
use crate::core::library::PatronType;
use crate::patrons::domain::{Hold, OverdueCheckout, PatronInformation};
use crate::patrons::domain::duration::HoldDuration;
use crate::patrons::domain::policy::PlacingOnHoldPolicy;
use crate::patrons::events::{BookHoldFailed, BookPlacedOnHold, BookPlacedOnHoldEvents, MaximumNumberOfHoldsReached};

// PlaceOnHoldDecision is the aggregate's answer to a hold request; exactly one side is set
#[derive(Debug, PartialEq, Clone)]
pub enum PlaceOnHoldDecision {
    Failed(BookHoldFailed),
    Placed(BookPlacedOnHoldEvents),
}

// PatronBooks is the consistency boundary for everything a patron holds or owes
#[derive(Debug, PartialEq, Clone)]
pub struct PatronBooks {
    patron: PatronInformation,
    holds: Vec<Hold>,
    overdue_checkouts: Vec<OverdueCheckout>,
    limits: HoldLimits,
    version: i64,
}

impl PatronBooks {
    pub fn new(patron: PatronInformation, holds: Vec<Hold>, overdue_checkouts: Vec<OverdueCheckout>,
               limits: HoldLimits, version: i64) -> Self {
        Self {
            patron,
            holds,
            overdue_checkouts,
            limits,
            version,
        }
    }

    pub fn empty(patron_id: PatronId, patron_type: PatronType, limits: HoldLimits) -> Self {
        Self::new(PatronInformation::new(patron_id, patron_type), vec![], vec![], limits, 0)
    }

    pub fn with_holds(mut self, holds: Vec<Hold>) -> Self {
        self.holds = holds;
        self
    }

    pub fn with_overdue_checkouts(mut self, overdue_checkouts: Vec<OverdueCheckout>) -> Self {
        self.overdue_checkouts = overdue_checkouts;
        self
    }

    pub fn patron(&self) -> &PatronInformation {
        &self.patron
    }

    pub fn patron_id(&self) -> &PatronId {
        &self.patron.patron_id
    }

    pub fn is_regular(&self) -> bool {
        self.patron.is_regular()
    }

    pub fn holds(&self) -> &[Hold] {
        &self.holds
    }

    pub fn overdue_checkouts(&self) -> &[OverdueCheckout] {
        &self.overdue_checkouts
    }

    pub fn number_of_holds(&self) -> usize {
        self.holds.len()
    }

    pub fn overdue_checkouts_at(&self, library_branch_id: &LibraryBranchId) -> usize {
        self.overdue_checkouts.iter()
            .filter(|c| &c.library_branch_id == library_branch_id)
            .count()
    }

    pub fn limits(&self) -> HoldLimits {
        self.limits
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn place_on_hold(&self, book: &AvailableBook, duration: HoldDuration) -> PlaceOnHoldDecision {
        self.place_on_hold_at(book, duration, Utc::now().naive_utc())
    }

    pub fn place_on_hold_at(&self, book: &AvailableBook, duration: HoldDuration, now: NaiveDateTime) -> PlaceOnHoldDecision {
        if let Some(rejection) = PlacingOnHoldPolicy::first_rejection(book, self, &duration) {
            return PlaceOnHoldDecision::Failed(BookHoldFailed::now(
                rejection.reason.as_str(), now, self.patron_id(), &book.book_id, &book.library_branch_id));
        }
        let placed = BookPlacedOnHold {
            event_id: Uuid::new_v4().to_string(),
            when: now,
            patron_id: self.patron_id().clone(),
            book_id: book.book_id.clone(),
            book_type: book.book_type,
            library_branch_id: book.library_branch_id.clone(),
            hold_from: now,
            hold_till: duration.till(now),
        };
        let events = BookPlacedOnHoldEvents::events(placed, self.version);
        if self.number_of_holds() + 1 == self.limits.max_holds {
            return PlaceOnHoldDecision::Placed(events.and(MaximumNumberOfHoldsReached {
                event_id: Uuid::new_v4().to_string(),
                when: now,
                patron_id: self.patron_id().clone(),
                number_of_holds: self.limits.max_holds,
            }));
        }
        PlaceOnHoldDecision::Placed(events)
    }

    // folds an accepted hold into the patron's state and moves to the next version
    pub fn apply(&mut self, event: &BookPlacedOnHold) {
        self.holds.push(Hold {
            book_id: event.book_id.clone(),
            library_branch_id: event.library_branch_id.clone(),
            hold_from: event.hold_from,
            hold_till: event.hold_till,
        });
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use crate::books::domain::AvailableBook;
    use crate::core::domain::{BookId, HoldLimits, LibraryBranchId, PatronId};
    use crate::core::library::PatronType;
    use crate::patrons::domain::aggregate::{PatronBooks, PlaceOnHoldDecision};
    use crate::patrons::domain::duration::{HoldDuration, NumberOfDays};
    use crate::patrons::domain::{Hold, PatronInformation};

    fn holds_at(branch: &LibraryBranchId, count: usize) -> Vec<Hold> {
        (0..count).map(|_| Hold {
            book_id: BookId::random(),
            library_branch_id: branch.clone(),
            hold_from: Utc::now().naive_utc(),
            hold_till: None,
        }).collect()
    }

    #[tokio::test]
    async fn test_should_place_close_ended_hold() {
        let branch = LibraryBranchId::random();
        let book = AvailableBook::circulating(&branch);
        let patron = PatronBooks::empty(PatronId::random(), PatronType::Regular, HoldLimits::default());
        let now = Utc::now().naive_utc();

        let decision = patron.place_on_hold_at(&book, HoldDuration::close_ended(NumberOfDays::of(3).unwrap()), now);
        match decision {
            PlaceOnHoldDecision::Placed(events) => {
                assert_eq!(book.book_id, events.book_placed_on_hold.book_id);
                assert_eq!(Some(now + Duration::days(3)), events.book_placed_on_hold.hold_till);
                assert_eq!(None, events.maximum_number_of_holds_reached);
            }
            PlaceOnHoldDecision::Failed(failed) => panic!("unexpected rejection {}", failed.reason),
        }
    }

    #[tokio::test]
    async fn test_should_let_researcher_place_open_ended_hold_on_restricted_book() {
        let branch = LibraryBranchId::random();
        let patron = PatronBooks::empty(PatronId::random(), PatronType::Researcher, HoldLimits::default());
        let decision = patron.place_on_hold(&AvailableBook::restricted(&branch), HoldDuration::open_ended());
        assert!(matches!(decision, PlaceOnHoldDecision::Placed(ref e) if e.book_placed_on_hold.hold_till.is_none()));
    }

    #[tokio::test]
    async fn test_should_announce_maximum_holds_on_last_slot() {
        let branch = LibraryBranchId::random();
        let patron = PatronBooks::empty(PatronId::random(), PatronType::Regular, HoldLimits::default())
            .with_holds(holds_at(&branch, 4));
        let decision = patron.place_on_hold(
            &AvailableBook::circulating(&branch), HoldDuration::close_ended(NumberOfDays::of(1).unwrap()));
        match decision {
            PlaceOnHoldDecision::Placed(events) => {
                let reached = events.maximum_number_of_holds_reached.expect("should reach maximum");
                assert_eq!(5, reached.number_of_holds);
                assert_eq!(patron.patron_id(), &reached.patron_id);
            }
            PlaceOnHoldDecision::Failed(failed) => panic!("unexpected rejection {}", failed.reason),
        }
    }

    #[tokio::test]
    async fn test_should_fail_when_regular_patron_has_maximum_holds() {
        let branch = LibraryBranchId::random();
        let book = AvailableBook::circulating(&branch);
        let patron = PatronBooks::empty(PatronId::random(), PatronType::Regular, HoldLimits::default())
            .with_holds(holds_at(&branch, 5));
        match patron.place_on_hold(&book, HoldDuration::close_ended(NumberOfDays::of(1).unwrap())) {
            PlaceOnHoldDecision::Failed(failed) => {
                assert_eq!("patron cannot hold more books", failed.reason.as_str());
                assert_eq!(book.book_id, failed.book_id);
                assert_eq!(branch, failed.library_branch_id);
            }
            PlaceOnHoldDecision::Placed(_) => panic!("should not place hold"),
        }
    }

    #[tokio::test]
    async fn test_should_apply_placed_hold() {
        let branch = LibraryBranchId::random();
        let mut patron = PatronBooks::empty(PatronId::random(), PatronType::Researcher, HoldLimits::default());
        if let PlaceOnHoldDecision::Placed(events) = patron.place_on_hold(
            &AvailableBook::circulating(&branch), HoldDuration::open_ended()) {
            patron.apply(&events.book_placed_on_hold);
        }
        assert_eq!(1, patron.number_of_holds());
        assert_eq!(branch, patron.holds()[0].library_branch_id);
        assert_eq!(1, patron.version());
    }

    #[tokio::test]
    async fn test_should_carry_decided_version_in_events() {
        let branch = LibraryBranchId::random();
        let patron = PatronBooks::new(
            PatronInformation::new(PatronId::random(), PatronType::Researcher), vec![], vec![], HoldLimits::default(), 7);
        match patron.place_on_hold(&AvailableBook::circulating(&branch), HoldDuration::open_ended()) {
            PlaceOnHoldDecision::Placed(events) => assert_eq!(7, events.version),
            PlaceOnHoldDecision::Failed(failed) => panic!("unexpected rejection {}", failed.reason),
        }
    }
}
