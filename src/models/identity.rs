use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted identity record, owned by the credential store.
///
/// `username` and `email` are each globally unique, enforced by unique
/// constraints in the store. The password hash is opaque to everything but
/// the password hasher; plaintext passwords are never part of this type.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_not_serialized() {
        let identity = Identity {
            id: Uuid::new_v4(),
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
        };

        let json = serde_json::to_string(&identity).unwrap();
        assert!(json.contains("testuser"));
        assert!(!json.contains("$2b$12$secret"));
    }
}
