use std::sync::Arc;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::TokenCodec;
use crate::error::DomainError;
use crate::store::{CredentialStore, StoreError};

/// Orchestrates the three identity flows: register, login, and password
/// change.
///
/// Holds the credential store port and the token codec; never persists or
/// logs a raw password, and never issues a token outside `login`.
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    tokens: TokenCodec,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, tokens: TokenCodec) -> Self {
        Self { store, tokens }
    }

    /// Creates a new identity. No token is issued; registration and login are
    /// separate flows.
    ///
    /// The duplicate pre-checks below are advisory. Two concurrent
    /// registrations can both pass them, so the store's unique constraint is
    /// the authoritative signal and an insert-time violation is reclassified
    /// by the violated field.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), DomainError> {
        if self.store.find_by_username(username).await?.is_some() {
            return Err(DomainError::UsernameAlreadyExists);
        }
        if self.store.find_by_email(email).await?.is_some() {
            return Err(DomainError::EmailAlreadyExists);
        }

        let password_hash = hash_password(password)?;

        match self.store.insert(username, email, &password_hash).await {
            Ok(_) => Ok(()),
            // Carries which constraint was violated; classify by field.
            Err(err @ StoreError::UniqueViolation(_)) => Err(err.into()),
            Err(other) => Err(DomainError::UserCreationFailed(other.to_string())),
        }
    }

    /// Authenticates a username/password pair and issues a bearer token.
    ///
    /// An unknown username and a wrong password fail identically, so the
    /// response does not reveal which usernames exist.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, DomainError> {
        let identity = match self.store.find_by_username(username).await? {
            Some(identity) => identity,
            None => return Err(DomainError::InvalidCredentials),
        };

        if !verify_password(password, &identity.password_hash) {
            return Err(DomainError::InvalidCredentials);
        }

        self.tokens.issue(identity.id, &identity.username)
    }

    /// Rotates the subject's password after re-verifying the current one.
    ///
    /// A missing subject (deleted since the token was issued) is treated as
    /// an invalid session, not as "user not found".
    pub async fn change_password(
        &self,
        token: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        let claims = self.tokens.verify(token)?;
        let subject_id = claims.subject_id()?;

        let identity = self
            .store
            .find_by_id(subject_id)
            .await?
            .ok_or_else(|| DomainError::InvalidToken("Invalid token".to_string()))?;

        if !verify_password(old_password, &identity.password_hash) {
            return Err(DomainError::InvalidCredentials);
        }

        let new_hash = hash_password(new_password)?;

        match self.store.update_password(identity.id, &new_hash).await {
            Ok(()) => Ok(()),
            // Subject deleted between lookup and update: same as a dead session.
            Err(StoreError::NotFound) => {
                Err(DomainError::InvalidToken("Invalid token".to_string()))
            }
            Err(other) => Err(other.into()),
        }
    }
}
