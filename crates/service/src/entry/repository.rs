use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, Set};

use crate::errors::ServiceError;
use models::entry;

/// The entry store contract. Every write persists a single record with no
/// surrounding transaction; batching is the service's concern.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<entry::Model>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<entry::Model>, ServiceError>;
    async fn save(&self, entry: entry::Model) -> Result<entry::Model, ServiceError>;
    async fn update(&self, entry: entry::Model) -> Result<entry::Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmEntryRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl EntryRepository for SeaOrmEntryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<entry::Model>, ServiceError> {
        entry::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<entry::Model>, ServiceError> {
        entry::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn save(&self, entry: entry::Model) -> Result<entry::Model, ServiceError> {
        // The store assigns the id; whatever came in on the input is ignored.
        let am = entry::ActiveModel { id: NotSet, name: Set(entry.name) };
        am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn update(&self, entry: entry::Model) -> Result<entry::Model, ServiceError> {
        let am = entry::ActiveModel { id: Set(entry.id), name: Set(entry.name) };
        am.update(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        entry::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }
}

/// Simple in-memory repository for tests and doc examples.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockEntryRepository {
        entries: Mutex<HashMap<i32, entry::Model>>,
        next_id: AtomicI32,
    }

    impl MockEntryRepository {
        /// Insert a record with a caller-chosen id, as if it had been
        /// persisted earlier.
        pub fn seed(&self, model: entry::Model) {
            self.next_id.fetch_max(model.id, Ordering::SeqCst);
            self.entries.lock().unwrap().insert(model.id, model);
        }
    }

    #[async_trait]
    impl EntryRepository for MockEntryRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<entry::Model>, ServiceError> {
            Ok(self.entries.lock().unwrap().get(&id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<entry::Model>, ServiceError> {
            Ok(self.entries.lock().unwrap().values().cloned().collect())
        }

        async fn save(&self, entry: entry::Model) -> Result<entry::Model, ServiceError> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let persisted = entry::Model { id, name: entry.name };
            self.entries.lock().unwrap().insert(id, persisted.clone());
            Ok(persisted)
        }

        async fn update(&self, entry: entry::Model) -> Result<entry::Model, ServiceError> {
            self.entries.lock().unwrap().insert(entry.id, entry.clone());
            Ok(entry)
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            self.entries.lock().unwrap().remove(&id);
            Ok(())
        }
    }
}
