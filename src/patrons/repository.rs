pub mod ddb_patron_books_repository;
pub mod memory_patron_books_repository;

use async_trait::async_trait;
use crate::core::domain::PatronId;
use crate::core::library::LibraryResult;
use crate::patrons::domain::aggregate::PatronBooks;
use crate::patrons::events::BookPlacedOnHoldEvents;

#[async_trait]
pub trait PatronBooksRepository: Sync + Send {
    // resolves the patron aggregate; Ok(None) when the patron is unknown
    async fn find_by(&self, patron_id: &PatronId) -> LibraryResult<Option<PatronBooks>>;

    // records an accepted hold atomically and returns the new state
    async fn handle(&self, events: &BookPlacedOnHoldEvents) -> LibraryResult<PatronBooks>;
}
