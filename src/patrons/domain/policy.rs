use crate::books::domain::AvailableBook;
use crate::patrons::domain::aggregate::PatronBooks;
use crate::patrons::domain::duration::HoldDuration;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Rejection {
    pub reason: String,
}

impl Rejection {
    fn with_reason(reason: &str) -> Self {
        Rejection { reason: reason.to_string() }
    }
}

// PlacingOnHoldPolicy is one business rule a hold request must satisfy
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PlacingOnHoldPolicy {
    OnlyResearcherPatronsCanHoldRestrictedBooks,
    OverdueCheckoutsRejection,
    RegularPatronMaximumNumberOfHolds,
    OnlyResearcherPatronsCanPlaceOpenEndedHolds,
}

impl PlacingOnHoldPolicy {
    // evaluation order; the first rejection is reported
    pub const ALL: [PlacingOnHoldPolicy; 4] = [
        PlacingOnHoldPolicy::OnlyResearcherPatronsCanHoldRestrictedBooks,
        PlacingOnHoldPolicy::OverdueCheckoutsRejection,
        PlacingOnHoldPolicy::RegularPatronMaximumNumberOfHolds,
        PlacingOnHoldPolicy::OnlyResearcherPatronsCanPlaceOpenEndedHolds,
    ];

    pub fn check(&self, book: &AvailableBook, patron: &PatronBooks, duration: &HoldDuration) -> Result<(), Rejection> {
        match self {
            PlacingOnHoldPolicy::OnlyResearcherPatronsCanHoldRestrictedBooks => {
                if book.is_restricted() && patron.is_regular() {
                    return Err(Rejection::with_reason("Regular patrons cannot hold restricted books"));
                }
            }
            PlacingOnHoldPolicy::OverdueCheckoutsRejection => {
                if patron.overdue_checkouts_at(&book.library_branch_id) >= patron.limits().max_overdue_checkouts {
                    return Err(Rejection::with_reason("cannot place on hold when there are overdue checkouts"));
                }
            }
            PlacingOnHoldPolicy::RegularPatronMaximumNumberOfHolds => {
                if patron.is_regular() && patron.number_of_holds() >= patron.limits().max_holds {
                    return Err(Rejection::with_reason("patron cannot hold more books"));
                }
            }
            PlacingOnHoldPolicy::OnlyResearcherPatronsCanPlaceOpenEndedHolds => {
                if patron.is_regular() && duration.is_open_ended() {
                    return Err(Rejection::with_reason("regular patron cannot place open ended holds"));
                }
            }
        }
        Ok(())
    }

    pub fn first_rejection(book: &AvailableBook, patron: &PatronBooks, duration: &HoldDuration) -> Option<Rejection> {
        PlacingOnHoldPolicy::ALL.iter()
            .find_map(|policy| policy.check(book, patron, duration).err())
    }
}
