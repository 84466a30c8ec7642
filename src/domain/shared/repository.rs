use async_trait::async_trait;

// ============================================================================
// Repository Contract
// ============================================================================
//
// Persistence boundary shared by every entity. Storage itself lives in
// src/infrastructure/.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    /// A stored row no longer satisfies the entity's invariants
    #[error("{entity} {id} could not be restored: {reason}")]
    Corrupted { entity: &'static str, id: String, reason: String },
}

#[async_trait]
pub trait Repository<T>: Send + Sync {
    async fn create(&self, entity: &T) -> Result<(), RepositoryError>;
    async fn update(&self, entity: &T) -> Result<(), RepositoryError>;
    async fn find(&self, id: &str) -> Result<T, RepositoryError>;
    async fn find_all(&self) -> Result<Vec<T>, RepositoryError>;
}
