use async_trait::async_trait;

use crate::repository::errors::RepositoryResult;
use crate::repository::{StorageSigner, SupabaseRepository};

#[async_trait]
impl StorageSigner for SupabaseRepository {
    async fn sign_storage_key(&self, storage_key: &str) -> RepositoryResult<String> {
        self.client().sign_object(storage_key, self.token()).await
    }
}
