use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::patrons::repository::ddb_patron_books_repository::DDBPatronBooksRepository;
use crate::patrons::repository::PatronBooksRepository;
use crate::utils::ddb::{build_db_client, create_table};

pub async fn create_patron_books_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn PatronBooksRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBPatronBooksRepository::new(client, "patron_books", config.hold_limits()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "patron_books", "patron_id", None).await;
            Box::new(DDBPatronBooksRepository::new(client, "patron_books", config.hold_limits()))
        }
    }
}
