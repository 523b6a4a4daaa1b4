use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::books::repository::FindAvailableBook;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;
use crate::hold::domain::{HoldService, PlaceOnHoldResult};
use crate::hold::domain::model::PlaceOnHoldCommand;
use crate::patrons::domain::aggregate::PlaceOnHoldDecision;
use crate::patrons::events::{BOOK_HOLD_FAILED, BOOK_PLACED_ON_HOLD, BookHoldFailed, BookPlacedOnHoldEvents};
use crate::patrons::repository::PatronBooksRepository;

const EVENT_GROUP: &str = "patron_books";

pub struct PlacingOnHoldService {
    branch_id: String,
    find_available_book: Box<dyn FindAvailableBook>,
    patron_repository: Box<dyn PatronBooksRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl PlacingOnHoldService {
    pub fn new(config: &Configuration, find_available_book: Box<dyn FindAvailableBook>,
               patron_repository: Box<dyn PatronBooksRepository>,
               events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            find_available_book,
            patron_repository,
            events_publisher,
        }
    }

    async fn publish_failed(&self, cmd: &PlaceOnHoldCommand, failed: &BookHoldFailed) {
        match DomainEvent::rejected(BOOK_HOLD_FAILED, EVENT_GROUP, failed.patron_id.as_str(),
                                    &self.metadata(cmd), failed) {
            Ok(event) => self.publish(&event).await,
            Err(err) => warn!("failed to build {} event: {}", BOOK_HOLD_FAILED, err),
        }
    }

    async fn publish_placed(&self, cmd: &PlaceOnHoldCommand, placed: &BookPlacedOnHoldEvents) {
        match DomainEvent::accepted(BOOK_PLACED_ON_HOLD, EVENT_GROUP, placed.patron_id.as_str(),
                                    &self.metadata(cmd), placed) {
            Ok(event) => self.publish(&event).await,
            Err(err) => warn!("failed to build {} event: {}", BOOK_PLACED_ON_HOLD, err),
        }
    }

    fn metadata(&self, cmd: &PlaceOnHoldCommand) -> HashMap<String, String> {
        HashMap::from([
            ("library_branch_id".to_string(), cmd.library_branch_id.to_string()),
            ("book_id".to_string(), cmd.book_id.to_string()),
            ("served_by".to_string(), self.branch_id.clone()),
        ])
    }

    // the outcome is already decided, a lost event does not change it
    async fn publish(&self, event: &DomainEvent) {
        if let Err(err) = self.events_publisher.publish(event).await {
            warn!("failed to publish {} for {}: {}", event.name, event.key, err);
        }
    }
}

#[async_trait]
impl HoldService for PlacingOnHoldService {
    async fn place_on_hold(&self, cmd: &PlaceOnHoldCommand) -> LibraryResult<PlaceOnHoldResult> {
        let book = self.find_available_book.find_available_book_by(&cmd.book_id).await?
            .ok_or_else(|| {
                info!("book {} is not available", cmd.book_id);
                LibraryError::not_found(format!("Can not find book with id {}", cmd.book_id).as_str())
            })?;
        let patron = self.patron_repository.find_by(&cmd.patron_id).await?
            .ok_or_else(|| {
                info!("patron {} is unknown", cmd.patron_id);
                LibraryError::not_found(format!("Patron with given Id does not exists: {}", cmd.patron_id).as_str())
            })?;

        match patron.place_on_hold(&book, cmd.hold_duration()) {
            PlaceOnHoldDecision::Failed(failed) => {
                info!("patron {} cannot hold book {}: {}", cmd.patron_id, cmd.book_id, failed.reason);
                self.publish_failed(cmd, &failed).await;
                Ok(PlaceOnHoldResult::Rejection)
            }
            PlaceOnHoldDecision::Placed(placed) => {
                match self.patron_repository.handle(&placed).await {
                    Ok(updated) => {
                        info!("patron {} placed book {} on hold, now holds {}",
                            cmd.patron_id, cmd.book_id, updated.number_of_holds());
                        self.publish_placed(cmd, &placed).await;
                        Ok(PlaceOnHoldResult::Success)
                    }
                    Err(err) => {
                        warn!("failed to save hold of book {} for patron {}: {}", cmd.book_id, cmd.patron_id, err);
                        Ok(PlaceOnHoldResult::Rejection)
                    }
                }
            }
        }
    }
}
