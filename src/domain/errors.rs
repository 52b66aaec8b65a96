// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    /// The store rejected a write because another article already holds the slug.
    #[error("slug already exists: {0}")]
    SlugConflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("no free slug could be derived from '{base}' after {attempts} attempts")]
    SlugAssignmentExhausted { base: String, attempts: usize },
    #[error("persistence error: {0}")]
    Persistence(String),
}
