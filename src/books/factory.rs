use crate::books::repository::FindAvailableBook;
use crate::books::repository::ddb_book_repository::DDBBookRepository;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_table};

pub async fn create_find_available_book(store: RepositoryStore) -> Box<dyn FindAvailableBook> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBBookRepository::new(client, "books"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "books", "book_id", None).await;
            Box::new(DDBBookRepository::new(client, "books"))
        }
    }
}
