use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::domain::{BookId, LibraryBranchId, PatronId};
use crate::core::library::PatronType;
use crate::utils::date::{opt_serializer, serializer};

pub mod aggregate;
pub mod duration;
pub mod model;
pub mod policy;

// PatronInformation is the part of a patron the lending context cares about
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct PatronInformation {
    pub patron_id: PatronId,
    pub patron_type: PatronType,
}

impl PatronInformation {
    pub fn new(patron_id: PatronId, patron_type: PatronType) -> Self {
        Self { patron_id, patron_type }
    }

    pub fn is_regular(&self) -> bool {
        self.patron_type == PatronType::Regular
    }
}

// Hold is a book a patron currently has on hold
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Hold {
    pub book_id: BookId,
    pub library_branch_id: LibraryBranchId,
    #[serde(with = "serializer")]
    pub hold_from: NaiveDateTime,
    #[serde(default, with = "opt_serializer")]
    pub hold_till: Option<NaiveDateTime>,
}

// OverdueCheckout is a checked out book the patron did not return in time
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct OverdueCheckout {
    pub book_id: BookId,
    pub library_branch_id: LibraryBranchId,
}

impl OverdueCheckout {
    pub fn new(book_id: BookId, library_branch_id: LibraryBranchId) -> Self {
        Self { book_id, library_branch_id }
    }
}
