use tracing::warn;
use crate::core::repository::RepositoryStore;
use crate::gateway::ddb::publisher::DDBPublisher;
use crate::gateway::events::EventPublisher;
use crate::gateway::GatewayPublisherVia;
use crate::gateway::sns::publisher::SNSPublisher;
use crate::patrons::events::{BOOK_HOLD_FAILED, BOOK_PLACED_ON_HOLD};
use crate::utils::ddb::{build_db_client, build_sns_client, create_table};

pub async fn create_publisher(via: GatewayPublisherVia) -> Box<dyn EventPublisher> {
    match via {
        GatewayPublisherVia::Sns => {
            let mut publisher = SNSPublisher::new(build_sns_client().await);
            for topic in [BOOK_PLACED_ON_HOLD, BOOK_HOLD_FAILED] {
                if let Err(err) = publisher.create_topic(topic).await {
                    warn!("failed to create topic {}: {}", topic, err);
                }
            }
            Box::new(publisher)
        }
        GatewayPublisherVia::LocalDynamoDB => {
            let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
            let _ = create_table(&client, "events", "event_id", Some(("group", "key"))).await;
            Box::new(DDBPublisher::new(client, "events"))
        }
    }
}
