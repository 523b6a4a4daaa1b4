use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;

// InMemoryPublisher keeps published events in order; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct InMemoryPublisher {
    topics: Arc<RwLock<Vec<String>>>,
    events: Arc<RwLock<Vec<DomainEvent>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    // every later publish returns an error
    pub fn failing() -> Self {
        let publisher = Self::default();
        publisher.failing.store(true, Ordering::SeqCst);
        publisher
    }

    pub async fn events(&self) -> Vec<DomainEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl EventPublisher for InMemoryPublisher {
    async fn create_topic(&mut self, topic: &str) -> LibraryResult<String> {
        let mut topics = self.topics.write().await;
        if !topics.iter().any(|t| t == topic) {
            topics.push(topic.to_string());
        }
        Ok(topic.to_string())
    }

    async fn get_topics(&mut self) -> LibraryResult<Vec<String>> {
        Ok(self.topics.read().await.clone())
    }

    async fn publish(&self, event: &DomainEvent) -> LibraryResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(LibraryError::unavailable(
                format!("publisher is down for {}", event.name).as_str(), None, true));
        }
        self.events.write().await.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::DomainEvent;
    use crate::gateway::events::EventPublisher;
    use crate::gateway::memory::publisher::InMemoryPublisher;

    #[tokio::test]
    async fn test_should_record_published_events() {
        let mut publisher = InMemoryPublisher::new();
        let _ = publisher.create_topic("topic").await.expect("should create topic");
        let _ = publisher.create_topic("topic").await.expect("should create topic");
        assert_eq!(vec!["topic".to_string()], publisher.get_topics().await.expect("should get topics"));

        let event = DomainEvent::accepted("topic", "group", "key", &HashMap::new(), &"data").expect("build event");
        let observer = publisher.clone();
        publisher.publish(&event).await.expect("should publish");
        assert_eq!(vec![event], observer.events().await);
    }

    #[tokio::test]
    async fn test_should_fail_publish_when_failing() {
        let publisher = InMemoryPublisher::failing();
        let event = DomainEvent::rejected("topic", "group", "key", &HashMap::new(), &"data").expect("build event");
        assert!(publisher.publish(&event).await.is_err());
        assert!(publisher.events().await.is_empty());
    }
}
