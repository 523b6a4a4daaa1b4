use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::books::domain::AvailableBook;
use crate::books::repository::FindAvailableBook;
use crate::core::domain::BookId;
use crate::core::library::LibraryResult;

/// In-memory book lookup used by tests and local wiring.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookRepository {
    books: Arc<RwLock<HashMap<BookId, AvailableBook>>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, book: AvailableBook) {
        self.books.write().await.insert(book.book_id.clone(), book);
    }

    pub async fn remove(&self, book_id: &BookId) -> Option<AvailableBook> {
        self.books.write().await.remove(book_id)
    }
}

#[async_trait]
impl FindAvailableBook for InMemoryBookRepository {
    async fn find_available_book_by(&self, book_id: &BookId) -> LibraryResult<Option<AvailableBook>> {
        Ok(self.books.read().await.get(book_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::AvailableBook;
    use crate::books::repository::FindAvailableBook;
    use crate::books::repository::memory_book_repository::InMemoryBookRepository;
    use crate::core::domain::{BookId, LibraryBranchId};

    #[tokio::test]
    async fn test_should_find_added_book() {
        let repo = InMemoryBookRepository::new();
        let book = AvailableBook::circulating(&LibraryBranchId::random());
        repo.add(book.clone()).await;

        let found = repo.find_available_book_by(&book.book_id).await.expect("should lookup");
        assert_eq!(Some(book.clone()), found);

        let _ = repo.remove(&book.book_id).await;
        assert_eq!(None, repo.find_available_book_by(&book.book_id).await.expect("should lookup"));
        assert_eq!(None, repo.find_available_book_by(&BookId::random()).await.expect("should lookup"));
    }
}
