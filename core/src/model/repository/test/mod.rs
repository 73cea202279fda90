use crate::{
    model::{repository::Store, NewResource},
    storage::MemoryBackend,
};

pub mod query;
pub mod resource;
pub mod storage;

/// Store on a fresh memory backend, seeded with the default categories.
pub async fn test_store() -> Store {
    Store::open(MemoryBackend::new())
        .await
        .expect("opening memory store failed")
}

pub fn new_resource(title: &str, category: &str) -> NewResource {
    NewResource {
        title: title.to_owned(),
        category: category.to_owned(),
        description: format!("{} description", title),
        ..Default::default()
    }
}

pub fn rated(title: &str, category: &str, rating: f64) -> NewResource {
    NewResource {
        rating: Some(rating),
        ..new_resource(title, category)
    }
}
