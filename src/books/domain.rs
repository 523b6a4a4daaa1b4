use serde::{Deserialize, Serialize};
use crate::core::domain::{BookId, LibraryBranchId};
use crate::core::library::BookType;

pub mod model;

// AvailableBook is the snapshot of a book that can currently be placed on hold
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct AvailableBook {
    pub book_id: BookId,
    pub book_type: BookType,
    pub library_branch_id: LibraryBranchId,
    pub version: i64,
}

impl AvailableBook {
    pub fn new(book_id: BookId, book_type: BookType, library_branch_id: LibraryBranchId) -> Self {
        Self {
            book_id,
            book_type,
            library_branch_id,
            version: 0,
        }
    }

    pub fn circulating(library_branch_id: &LibraryBranchId) -> Self {
        Self::new(BookId::random(), BookType::Circulating, library_branch_id.clone())
    }

    pub fn restricted(library_branch_id: &LibraryBranchId) -> Self {
        Self::new(BookId::random(), BookType::Restricted, library_branch_id.clone())
    }

    pub fn is_restricted(&self) -> bool {
        self.book_type == BookType::Restricted
    }
}
