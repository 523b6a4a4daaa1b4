use std::collections::HashMap;
use aws_sdk_sns::Client;
use async_trait::async_trait;
use aws_sdk_sns::error::SdkError;
use aws_sdk_sns::operation::create_topic::CreateTopicError;
use aws_sdk_sns::operation::list_topics::ListTopicsError;
use aws_sdk_sns::operation::publish::PublishError;
use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;

// SNSPublisher publishes each event to the topic named after it
#[derive(Debug)]
pub struct SNSPublisher {
    client: Client,
    topics: HashMap<String, String>,
}

impl SNSPublisher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            topics: HashMap::new(),
        }
    }
}

#[async_trait]
impl EventPublisher for SNSPublisher {
    async fn create_topic(&mut self, topic: &str) -> LibraryResult<String> {
        let resp = self.client.create_topic().name(topic).send().await?;
        let arn = resp.topic_arn().unwrap_or_default();
        self.topics.insert(topic.to_string(), arn.to_string());
        info!("created topic {} with arn {}", topic, arn);
        Ok(arn.to_string())
    }

    async fn get_topics(&mut self) -> LibraryResult<Vec<String>> {
        let resp = self.client.list_topics().send().await?;
        Ok(resp.topics().unwrap_or_default().iter()
            .map(|t| t.topic_arn().unwrap_or_default().to_string())
            .collect())
    }

    async fn publish(&self, event: &DomainEvent) -> LibraryResult<()> {
        let arn = self.topics.get(event.name.as_str()).ok_or_else(|| {
            LibraryError::runtime(format!("topic is not found {}", event.name).as_str(), None)
        })?;
        let json = serde_json::to_string(event)?;
        self.client.publish().topic_arn(arn).message(json).send().await?;
        Ok(())
    }
}

impl From<SdkError<CreateTopicError>> for LibraryError {
    fn from(err: SdkError<CreateTopicError>) -> Self {
        LibraryError::runtime(format!("{:?}", err).as_str(), None)
    }
}

impl From<SdkError<ListTopicsError>> for LibraryError {
    fn from(err: SdkError<ListTopicsError>) -> Self {
        LibraryError::runtime(format!("{:?}", err).as_str(), None)
    }
}

impl From<SdkError<PublishError>> for LibraryError {
    fn from(err: SdkError<PublishError>) -> Self {
        LibraryError::runtime(format!("{:?}", err).as_str(), None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::DomainEvent;
    use crate::gateway::events::EventPublisher;
    use crate::gateway::sns::publisher::SNSPublisher;
    use crate::utils::ddb::build_sns_client;

    #[tokio::test]
    #[ignore = "requires AWS credentials"]
    async fn test_should_publish_to_sns() {
        let data = HashMap::from([("a", 1), ("b", 2)]);
        let event = DomainEvent::accepted("test-name", "group", "key",
                                          &HashMap::from([("k".to_string(), "v".to_string())]), &data).expect("build event");
        let mut publisher = SNSPublisher::new(build_sns_client().await);
        let arn = publisher.create_topic(event.name.as_str()).await.expect("should create topic");
        let _ = publisher.publish(&event).await.expect("should publish");
        let topics = publisher.get_topics().await.expect("should get topics");
        assert!(topics.contains(&arn));
    }
}
