use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use tracing::debug;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;
use crate::utils::ddb::parse_item;

// DDBPublisher appends events to a table; topics are implicit in the event name
#[derive(Debug)]
pub struct DDBPublisher {
    client: Client,
    table_name: String,
}

impl DDBPublisher {
    pub fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl EventPublisher for DDBPublisher {
    async fn create_topic(&mut self, topic: &str) -> LibraryResult<String> {
        Ok(topic.to_string())
    }

    async fn get_topics(&mut self) -> LibraryResult<Vec<String>> {
        Ok(vec![])
    }

    async fn publish(&self, event: &DomainEvent) -> LibraryResult<()> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(event)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(event_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map_err(LibraryError::from)?;
        debug!("stored event {} {}", event.name, event.event_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;
    use crate::core::events::DomainEvent;
    use crate::core::repository::RepositoryStore;
    use crate::gateway::ddb::publisher::DDBPublisher;
    use crate::gateway::events::EventPublisher;
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "events").await;
                let _ = create_table(&client, "events", "event_id", Some(("group", "key"))).await;
                client
            });
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB local on localhost:8000"]
    async fn test_should_publish_to_ddb() {
        let data = HashMap::from([("a", 1), ("b", 2)]);
        let event = DomainEvent::accepted("test-name", "group", "key",
                                          &HashMap::from([("k".to_string(), "v".to_string())]), &data).expect("build event");
        let mut publisher = DDBPublisher::new(CLIENT.get().await.clone(), "events");
        let topic = publisher.create_topic(event.name.as_str()).await.expect("should create topic");
        assert_eq!("test-name", topic);
        let _ = publisher.publish(&event).await.expect("should publish");
        // same event id cannot be stored twice
        assert!(publisher.publish(&event).await.is_err());
        let topics = publisher.get_topics().await.expect("should get topics");
        assert_eq!(0, topics.len());
    }
}
