use async_trait::async_trait;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryResult;

// EventPublisher hands domain events to whatever transport the deployment uses
#[async_trait]
pub trait EventPublisher: Sync + Send {
    async fn create_topic(&mut self, topic: &str) -> LibraryResult<String>;
    async fn get_topics(&mut self) -> LibraryResult<Vec<String>>;
    async fn publish(&self, event: &DomainEvent) -> LibraryResult<()>;
}
