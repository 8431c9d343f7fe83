//! Base repository trait for database operations.

use crate::db::errors::Result;

/// Base repository trait providing the operations every table supports.
///
/// A repository is the data access layer for one postgres table. It borrows a
/// connection (or a transaction) for its whole lifetime, so every call made through
/// it belongs to the same unit of work. Entities are insert-only: there is no update
/// or delete.
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest;

    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// Insert a new entity, returning it with its store-generated fields.
    ///
    /// The row only becomes visible to other connections once the caller commits the
    /// surrounding transaction.
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID. Absence is `Ok(None)`, never an error.
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List all entities, newest first
    async fn list(&mut self) -> Result<Vec<Self::Response>>;
}
