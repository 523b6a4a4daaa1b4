use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::books::domain::AvailableBook;
use crate::core::domain::{BookId, LibraryBranchId};
use crate::core::library::{BookStatus, BookType};
use crate::utils::date::serializer;

// BookEntity is a physical copy of a book as stored for the lending context; there
// can be many copies of the same title, each with its own identifier.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BookEntity {
    pub book_id: String,
    pub version: i64,
    pub library_branch_id: String,
    pub book_type: BookType,
    pub book_status: BookStatus,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookEntity {
    pub fn new(library_branch_id: &str, book_type: BookType, status: BookStatus) -> Self {
        Self {
            book_id: Uuid::new_v4().to_string(),
            version: 0,
            library_branch_id: library_branch_id.to_string(),
            book_type,
            book_status: status,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn to_available(&self) -> Option<AvailableBook> {
        if self.book_status != BookStatus::Available {
            return None;
        }
        Some(AvailableBook {
            book_id: BookId::new(self.book_id.as_str()),
            book_type: self.book_type,
            library_branch_id: LibraryBranchId::new(self.library_branch_id.as_str()),
            version: self.version,
        })
    }
}
