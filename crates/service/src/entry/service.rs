use std::sync::Arc;

use tracing::{info, instrument};

use crate::entry::repository::EntryRepository;
use crate::errors::ServiceError;
use models::entry;

/// Application service enforcing the domain rules for entry records. The
/// sole authority translating store outcomes into domain success/failure.
pub struct EntryService {
    repo: Arc<dyn EntryRepository>,
}

impl EntryService {
    pub fn new(repo: Arc<dyn EntryRepository>) -> Self { Self { repo } }

    /// Fetch a single entry.
    ///
    /// # Examples
    /// ```
    /// use service::entry::{repository::mock::MockEntryRepository, service::EntryService};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockEntryRepository::default());
    /// repo.seed(models::entry::Model { id: 1, name: "Cowboy Bebop".into() });
    /// let svc = EntryService::new(repo);
    /// let found = tokio_test::block_on(svc.find_by_id(1)).unwrap();
    /// assert_eq!(found.name, "Cowboy Bebop");
    /// ```
    pub async fn find_by_id(&self, id: i32) -> Result<entry::Model, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("entry"))
    }

    pub async fn find_all(&self) -> Result<Vec<entry::Model>, ServiceError> {
        self.repo.find_all().await
    }

    /// Persist a new entry; the store assigns the id. Name validity is the
    /// API layer's concern for single saves, so none is checked here.
    #[instrument(skip(self, entry), fields(name = %entry.name))]
    pub async fn save(&self, entry: entry::Model) -> Result<entry::Model, ServiceError> {
        let saved = self.repo.save(entry).await?;
        info!(id = saved.id, "entry_saved");
        Ok(saved)
    }

    /// Persist a batch of entries in one logical call.
    ///
    /// The batch is not transactional: records are written through the
    /// store one at a time, and each persisted result is inspected as it
    /// comes back. The first persisted record with an empty name fails the
    /// whole call before the next write is issued; records written before
    /// it are not retracted, records after it are never attempted.
    #[instrument(skip(self, entries), fields(count = entries.len()))]
    pub async fn save_batch(&self, entries: Vec<entry::Model>) -> Result<Vec<entry::Model>, ServiceError> {
        let mut saved = Vec::with_capacity(entries.len());
        for entry in entries {
            let persisted = self.repo.save(entry).await?;
            if persisted.name.is_empty() {
                return Err(ServiceError::Validation("Invalid Name".into()));
            }
            saved.push(persisted);
        }
        info!(count = saved.len(), "entry_batch_saved");
        Ok(saved)
    }

    /// Full-record replacement of an existing entry. Fails with `NotFound`
    /// before touching the store's mutating path when the id is absent.
    pub async fn update(&self, entry: entry::Model) -> Result<(), ServiceError> {
        self.find_by_id(entry.id).await?;
        self.repo.update(entry).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.find_by_id(id).await?;
        self.repo.delete(id).await
    }
}
