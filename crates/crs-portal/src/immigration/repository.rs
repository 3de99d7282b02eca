use super::domain::{ImmigrationFile, OwnerId};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ImmigrationFileRepository: Send + Sync {
    fn insert(&self, file: ImmigrationFile) -> Result<ImmigrationFile, RepositoryError>;
    fn update(&self, file: ImmigrationFile) -> Result<(), RepositoryError>;
    /// Most recently created active file for the owner, if any.
    fn active_for_owner(&self, owner: &OwnerId) -> Result<Option<ImmigrationFile>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("immigration file already exists")]
    Conflict,
    #[error("immigration file not found")]
    NotFound,
    #[error("file store unavailable: {0}")]
    Unavailable(String),
}
