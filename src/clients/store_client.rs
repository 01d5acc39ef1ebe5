//! Shared plumbing for typed store clients.

use async_trait::async_trait;

use crate::store::{StoreClient, StoreEntity, StoreError};

/// Trait for record-specific clients to inherit the common read operations.
///
/// Keeps the typed wrappers thin: they supply the inner generic client and an
/// error mapping, and get `get` for free.
#[async_trait]
pub trait EntityClient<T: StoreEntity>: Send + Sync {
    /// The record-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &StoreClient<T>;

    /// Map store transport errors to the record-specific error type.
    fn map_error(e: StoreError<T::Error>) -> Self::Error;

    /// Fetch a record by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }
}
