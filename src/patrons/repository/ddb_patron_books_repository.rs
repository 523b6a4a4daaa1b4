use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;
use tracing::debug;

use crate::core::domain::{HoldLimits, PatronId};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::patrons::domain::aggregate::PatronBooks;
use crate::patrons::domain::model::PatronBooksEntity;
use crate::patrons::events::BookPlacedOnHoldEvents;
use crate::patrons::repository::PatronBooksRepository;
use crate::utils::date::DATE_FMT;
use crate::utils::ddb::{parse_entity, parse_item, value_to_item};

#[derive(Debug)]
pub struct DDBPatronBooksRepository {
    client: Client,
    table_name: String,
    limits: HoldLimits,
}

impl DDBPatronBooksRepository {
    pub fn new(client: Client, table_name: &str, limits: HoldLimits) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            limits,
        }
    }
}

#[async_trait]
impl Repository<PatronBooksEntity> for DDBPatronBooksRepository {
    async fn create(&self, entity: &PatronBooksEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(patron_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn update(&self, entity: &PatronBooksEntity) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();
        let holds = value_to_item(serde_json::to_value(&entity.holds)?);
        let overdue_checkouts = value_to_item(serde_json::to_value(&entity.overdue_checkouts)?);

        self.client
            .update_item()
            .table_name(table_name)
            .key("patron_id", AttributeValue::S(entity.patron_id.clone()))
            .update_expression("SET version = :version, patron_type = :patron_type, holds = :holds, overdue_checkouts = :overdue_checkouts, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":patron_type", AttributeValue::S(entity.patron_type.to_string()))
            .expression_attribute_values(":holds", holds)
            .expression_attribute_values(":overdue_checkouts", overdue_checkouts)
            .expression_attribute_values(":updated_at", AttributeValue::S(now.format(DATE_FMT).to_string()))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn get(&self, id: &str) -> LibraryResult<PatronBooksEntity> {
        let table_name: &str = self.table_name.as_ref();
        let res = self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression("patron_id = :patron_id")
            .expression_attribute_values(":patron_id", AttributeValue::S(id.to_string()))
            .send()
            .await?;
        let items = res.items.unwrap_or_default();
        if items.len() > 1 {
            return Err(LibraryError::database(format!("too many patrons for {}", id).as_str(), None, false));
        }
        match items.first() {
            Some(map) => parse_entity(map),
            None => Err(LibraryError::not_found(format!("patron not found for {}", id).as_str())),
        }
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("patron_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }
}

#[async_trait]
impl PatronBooksRepository for DDBPatronBooksRepository {
    async fn find_by(&self, patron_id: &PatronId) -> LibraryResult<Option<PatronBooks>> {
        match self.get(patron_id.as_str()).await {
            Ok(entity) => Ok(Some(entity.to_aggregate(self.limits))),
            Err(LibraryError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    // the update is conditioned on the version the hold was decided against, so a
    // write that landed after find_by surfaces as a retryable CurrentlyUnavailable
    async fn handle(&self, events: &BookPlacedOnHoldEvents) -> LibraryResult<PatronBooks> {
        let mut entity = self.get(events.patron_id.as_str()).await?;
        if entity.version != events.version {
            return Err(LibraryError::unavailable(
                format!("stale version {} of patron {}, current {}",
                        events.version, events.patron_id, entity.version).as_str(),
                Some("ConditionalCheckFailed".to_string()), true));
        }
        let mut patron = entity.to_aggregate(self.limits);
        patron.apply(&events.book_placed_on_hold);
        entity.merge(&patron);
        self.update(&entity).await?;
        debug!("patron {} now holds {} books", events.patron_id, patron.number_of_holds());
        Ok(patron)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;

    use crate::books::domain::AvailableBook;
    use crate::core::domain::{BookId, HoldLimits, LibraryBranchId, PatronId};
    use crate::core::library::PatronType;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::patrons::domain::aggregate::PlaceOnHoldDecision;
    use crate::patrons::domain::duration::HoldDuration;
    use crate::patrons::domain::model::PatronBooksEntity;
    use crate::patrons::domain::OverdueCheckout;
    use crate::patrons::repository::ddb_patron_books_repository::DDBPatronBooksRepository;
    use crate::patrons::repository::PatronBooksRepository;
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "patron_books").await;
                let _ = create_table(&client, "patron_books", "patron_id", None).await;
                client
            });
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB local on localhost:8000"]
    async fn test_should_create_find_patron() {
        let repo = DDBPatronBooksRepository::new(CLIENT.get().await.clone(), "patron_books", HoldLimits::default());
        let mut entity = PatronBooksEntity::new(PatronType::Regular);
        let branch = LibraryBranchId::random();
        entity.overdue_checkouts.push(OverdueCheckout::new(BookId::random(), branch.clone()));
        let size = repo.create(&entity).await.expect("should create patron");
        assert_eq!(1, size);

        let patron = repo.find_by(&PatronId::new(entity.patron_id.as_str()))
            .await.expect("should lookup patron").expect("should exist");
        assert!(patron.is_regular());
        assert_eq!(1, patron.overdue_checkouts_at(&branch));
        assert_eq!(None, repo.find_by(&PatronId::random()).await.expect("should lookup patron"));
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB local on localhost:8000"]
    async fn test_should_handle_placed_hold() {
        let repo = DDBPatronBooksRepository::new(CLIENT.get().await.clone(), "patron_books", HoldLimits::default());
        let entity = PatronBooksEntity::new(PatronType::Researcher);
        let _ = repo.create(&entity).await.expect("should create patron");
        let patron = repo.find_by(&PatronId::new(entity.patron_id.as_str()))
            .await.expect("should lookup patron").expect("should exist");

        let PlaceOnHoldDecision::Placed(events) = patron.place_on_hold(
            &AvailableBook::restricted(&LibraryBranchId::random()), HoldDuration::open_ended()) else {
            panic!("should place hold");
        };
        let updated = repo.handle(&events).await.expect("should persist hold");
        assert_eq!(1, updated.number_of_holds());
        assert_eq!(1, updated.version());

        let loaded = repo.get(entity.patron_id.as_str()).await.expect("should return patron");
        assert_eq!(1, loaded.holds.len());
        assert_eq!(None, loaded.holds[0].hold_till);
        assert_eq!(1, loaded.version);
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB local on localhost:8000"]
    async fn test_should_reject_stale_update() {
        let repo = DDBPatronBooksRepository::new(CLIENT.get().await.clone(), "patron_books", HoldLimits::default());
        let entity = PatronBooksEntity::new(PatronType::Regular);
        let _ = repo.create(&entity).await.expect("should create patron");
        let _ = repo.update(&entity).await.expect("should update patron");

        let stale = repo.update(&entity).await;
        assert!(stale.is_err());
        assert!(stale.unwrap_err().retryable());
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB local on localhost:8000"]
    async fn test_should_reject_hold_decided_on_stale_version() {
        let repo = DDBPatronBooksRepository::new(CLIENT.get().await.clone(), "patron_books", HoldLimits::default());
        let entity = PatronBooksEntity::new(PatronType::Researcher);
        let _ = repo.create(&entity).await.expect("should create patron");
        let patron = repo.find_by(&PatronId::new(entity.patron_id.as_str()))
            .await.expect("should lookup patron").expect("should exist");
        let branch = LibraryBranchId::random();

        let PlaceOnHoldDecision::Placed(first) = patron.place_on_hold(
            &AvailableBook::circulating(&branch), HoldDuration::open_ended()) else {
            panic!("should place hold");
        };
        let PlaceOnHoldDecision::Placed(second) = patron.place_on_hold(
            &AvailableBook::circulating(&branch), HoldDuration::open_ended()) else {
            panic!("should place hold");
        };
        let _ = repo.handle(&first).await.expect("should persist hold");
        let err = repo.handle(&second).await.expect_err("should reject stale hold");
        assert!(err.retryable());

        let loaded = repo.get(entity.patron_id.as_str()).await.expect("should return patron");
        assert_eq!(1, loaded.holds.len());
        assert_eq!(1, loaded.version);
    }
}
