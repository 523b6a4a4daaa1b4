pub mod ddb_book_repository;
pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::AvailableBook;
use crate::core::domain::BookId;
use crate::core::library::LibraryResult;

// FindAvailableBook resolves a book to its availability snapshot; Ok(None) means
// the book is unknown or not available right now.
#[async_trait]
pub trait FindAvailableBook: Sync + Send {
    async fn find_available_book_by(&self, book_id: &BookId) -> LibraryResult<Option<AvailableBook>>;
}
