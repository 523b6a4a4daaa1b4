use crate::books::factory::create_find_available_book;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::hold::domain::HoldService;
use crate::hold::domain::service::PlacingOnHoldService;
use crate::patrons::factory::create_patron_books_repository;

pub async fn create_hold_service(config: &Configuration, store: RepositoryStore) -> Box<dyn HoldService> {
    let find_available_book = create_find_available_book(store).await;
    let patron_repository = create_patron_books_repository(config, store).await;
    let publisher = create_publisher(store.gateway_publisher()).await;
    Box::new(PlacingOnHoldService::new(config, find_available_book, patron_repository, publisher))
}
