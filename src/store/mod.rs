//!
//! # Credential Store
//!
//! The persistence port consumed by the auth service. The trait owns the
//! identity table; everything above it only sees `Identity` records and
//! classified `StoreError`s.
//!
//! Uniqueness of `username` and `email` is enforced here, by the backing
//! store's unique constraints. Callers may pre-check for duplicates, but the
//! `UniqueViolation` returned by `insert` is the authoritative signal.

pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Identity;

pub use postgres::PgCredentialStore;

/// Which unique column an insert collided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

/// Failures reported by a credential store implementation.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("unique constraint violated on {0:?}")]
    UniqueViolation(UniqueField),

    #[error("record not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(String),
}

/// Converts store failures into domain errors.
///
/// Uniqueness violations keep their field identity; anything else is an
/// internal failure. `insert` callers that need the more lenient
/// `UserCreationFailed` classification match on `StoreError` directly.
impl From<StoreError> for crate::error::DomainError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::UniqueViolation(UniqueField::Username) => {
                crate::error::DomainError::UsernameAlreadyExists
            }
            StoreError::UniqueViolation(UniqueField::Email) => {
                crate::error::DomainError::EmailAlreadyExists
            }
            StoreError::NotFound => crate::error::DomainError::Internal("record not found".into()),
            StoreError::Database(detail) => crate::error::DomainError::Internal(detail),
        }
    }
}

/// Lookup, insert, and password-update operations over persisted identities.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, StoreError>;

    /// Inserts a new identity. Fails with `UniqueViolation` if the username
    /// or email is already taken, naming the violated field.
    async fn insert(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Identity, StoreError>;

    /// Replaces the stored password hash. Fails with `NotFound` if the
    /// identity no longer exists.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError>;
}
