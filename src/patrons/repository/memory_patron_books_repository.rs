use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::domain::PatronId;
use crate::core::library::{LibraryError, LibraryResult};
use crate::patrons::domain::aggregate::PatronBooks;
use crate::patrons::events::BookPlacedOnHoldEvents;
use crate::patrons::repository::PatronBooksRepository;

/// In-memory patron store. `handle` only applies a hold decided against the
/// stored version, so concurrent holds on the same patron cannot both commit.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPatronBooksRepository {
    patrons: Arc<RwLock<HashMap<PatronId, PatronBooks>>>,
}

impl InMemoryPatronBooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, patron: PatronBooks) {
        self.patrons.write().await.insert(patron.patron_id().clone(), patron);
    }
}

#[async_trait]
impl PatronBooksRepository for InMemoryPatronBooksRepository {
    async fn find_by(&self, patron_id: &PatronId) -> LibraryResult<Option<PatronBooks>> {
        Ok(self.patrons.read().await.get(patron_id).cloned())
    }

    async fn handle(&self, events: &BookPlacedOnHoldEvents) -> LibraryResult<PatronBooks> {
        let mut patrons = self.patrons.write().await;
        let patron = patrons.get_mut(&events.patron_id).ok_or_else(|| {
            LibraryError::not_found(format!("patron not found for {}", events.patron_id).as_str())
        })?;
        if patron.version() != events.version {
            return Err(LibraryError::unavailable(
                format!("stale version {} of patron {}, current {}",
                        events.version, events.patron_id, patron.version()).as_str(),
                Some("ConditionalCheckFailed".to_string()), true));
        }
        patron.apply(&events.book_placed_on_hold);
        Ok(patron.clone())
    }
}
