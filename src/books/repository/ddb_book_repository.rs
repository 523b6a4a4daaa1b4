use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;
use tracing::debug;

use crate::books::domain::AvailableBook;
use crate::books::domain::model::BookEntity;
use crate::books::repository::FindAvailableBook;
use crate::core::domain::BookId;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::date::DATE_FMT;
use crate::utils::ddb::{parse_entity, parse_item};

#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
}

impl DDBBookRepository {
    pub fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(book_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::S(entity.book_id.clone()))
            .update_expression("SET version = :version, library_branch_id = :library_branch_id, book_type = :book_type, book_status = :book_status, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":library_branch_id", AttributeValue::S(entity.library_branch_id.clone()))
            .expression_attribute_values(":book_type", AttributeValue::S(entity.book_type.to_string()))
            .expression_attribute_values(":book_status", AttributeValue::S(entity.book_status.to_string()))
            .expression_attribute_values(":updated_at", AttributeValue::S(now.format(DATE_FMT).to_string()))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        let table_name: &str = self.table_name.as_ref();
        let res = self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression("book_id = :book_id")
            .expression_attribute_values(":book_id", AttributeValue::S(id.to_string()))
            .send()
            .await?;
        let items = res.items.unwrap_or_default();
        if items.len() > 1 {
            return Err(LibraryError::database(format!("too many books for {}", id).as_str(), None, false));
        }
        match items.first() {
            Some(map) => parse_entity(map),
            None => Err(LibraryError::not_found(format!("book not found for {}", id).as_str())),
        }
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }
}

#[async_trait]
impl FindAvailableBook for DDBBookRepository {
    async fn find_available_book_by(&self, book_id: &BookId) -> LibraryResult<Option<AvailableBook>> {
        match self.get(book_id.as_str()).await {
            Ok(book) => {
                let available = book.to_available();
                if available.is_none() {
                    debug!("book {} is {}", book_id, book.book_status);
                }
                Ok(available)
            }
            Err(LibraryError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
