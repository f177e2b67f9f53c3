use std::sync::Arc;

use crate::{
    config::Config,
    database::{MongoStore, WorkoutStore},
};

pub struct AppState {
    pub store: Arc<dyn WorkoutStore>,
}

impl AppState {
    pub async fn new(config: &Config) -> Arc<Self> {
        let store = MongoStore::connect(&config.mongo_uri).await;

        Arc::new(Self {
            store: Arc::new(store),
        })
    }

    /// State over an arbitrary store implementation; the tests use this with
    /// [`crate::database::MemoryStore`].
    pub fn with_store(store: Arc<dyn WorkoutStore>) -> Arc<Self> {
        Arc::new(Self { store })
    }
}
