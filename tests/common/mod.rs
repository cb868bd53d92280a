#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use tasktrack::auth::{AuthService, Clock, TokenCodec};
use tasktrack::models::Identity;
use tasktrack::store::{CredentialStore, StoreError, UniqueField};

pub const TEST_SECRET: &[u8] = b"test_secret_for_integration_tests";

/// In-memory `CredentialStore` with the same uniqueness discipline as the
/// Postgres implementation.
///
/// With `blind_lookups` set, the find methods always report "absent", which
/// simulates the register pre-check racing a concurrent duplicate insert: the
/// unique check at insert time is then the only line of defense.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    records: Mutex<HashMap<Uuid, Identity>>,
    blind_lookups: bool,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blind_lookups() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            blind_lookups: true,
        }
    }

    /// Deletes a record out from under the service, simulating an identity
    /// removed while its token is still in a client's hands.
    pub fn remove(&self, id: Uuid) {
        self.records.lock().unwrap().remove(&id);
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError> {
        if self.blind_lookups {
            return Ok(None);
        }
        let records = self.records.lock().unwrap();
        Ok(records.values().find(|r| r.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        if self.blind_lookups {
            return Ok(None);
        }
        let records = self.records.lock().unwrap();
        Ok(records.values().find(|r| r.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, StoreError> {
        let records = self.records.lock().unwrap();
        Ok(records.get(&id).cloned())
    }

    async fn insert(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Identity, StoreError> {
        let mut records = self.records.lock().unwrap();

        if records.values().any(|r| r.username == username) {
            return Err(StoreError::UniqueViolation(UniqueField::Username));
        }
        if records.values().any(|r| r.email == email) {
            return Err(StoreError::UniqueViolation(UniqueField::Email));
        }

        let identity = Identity {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        records.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        match records.get_mut(&id) {
            Some(record) => {
                record.password_hash = password_hash.to_string();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}

/// Manually advanced clock so expiry can be simulated without sleeping.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn starting_now() -> Self {
        Self {
            now: Mutex::new(Utc::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub struct Harness {
    pub store: Arc<InMemoryCredentialStore>,
    pub clock: Arc<ManualClock>,
    pub codec: TokenCodec,
    pub service: AuthService,
}

/// Builds an auth service over a fresh in-memory store with a one-hour token
/// TTL and a manually controlled clock.
pub fn harness() -> Harness {
    harness_with_store(Arc::new(InMemoryCredentialStore::new()))
}

pub fn harness_with_store(store: Arc<InMemoryCredentialStore>) -> Harness {
    let clock = Arc::new(ManualClock::starting_now());
    let codec = TokenCodec::new(TEST_SECRET, Duration::hours(1), clock.clone());
    let service = AuthService::new(store.clone(), codec.clone());
    Harness {
        store,
        clock,
        codec,
        service,
    }
}
