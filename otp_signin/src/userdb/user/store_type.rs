use crate::storage::GENERIC_DATA_STORE;
use crate::userdb::{errors::UserError, types::User};

use super::postgres::*;
use super::sqlite::*;

pub struct UserStore;

impl UserStore {
    /// Initialize the user database tables
    pub async fn init() -> Result<(), UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(UserError::Storage("Unsupported database type".to_string())),
        }
    }

    /// Get a user by their ID
    pub async fn get_user(id: &str) -> Result<Option<User>, UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_user_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            get_user_postgres(pool, id).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Get a user by their sign-in identifier (email or phone number)
    pub async fn get_user_by_identifier(identifier: &str) -> Result<Option<User>, UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_user_by_identifier_sqlite(pool, identifier).await
        } else if let Some(pool) = store.as_postgres() {
            get_user_by_identifier_postgres(pool, identifier).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Create or update a user
    pub async fn upsert_user(user: User) -> Result<User, UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            upsert_user_sqlite(pool, user).await
        } else if let Some(pool) = store.as_postgres() {
            upsert_user_postgres(pool, user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    pub async fn delete_user(id: &str) -> Result<(), UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            delete_user_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_user_postgres(pool, id).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::UserAttributes;
    use crate::test_utils::init_test_environment;
    use serial_test::serial;

    fn sample_user(id: &str, identifier: &str) -> User {
        User::new(
            id.to_string(),
            identifier.to_string(),
            UserAttributes {
                email: identifier.contains('@').then(|| identifier.to_string()),
                phone_number: None,
            },
        )
    }

    /// Store a user, then look it up by id and by identifier
    #[tokio::test]
    #[serial]
    async fn test_upsert_then_get_user() {
        init_test_environment().await;

        let user = sample_user("store-test-1", "store-test-1@example.com");
        UserStore::upsert_user(user.clone())
            .await
            .expect("Failed to upsert user");

        let by_id = UserStore::get_user("store-test-1")
            .await
            .expect("Failed to get user")
            .expect("User missing");
        assert_eq!(by_id.identifier, "store-test-1@example.com");

        let by_identifier = UserStore::get_user_by_identifier("store-test-1@example.com")
            .await
            .expect("Failed to get user by identifier")
            .expect("User missing");
        assert_eq!(by_identifier.id, "store-test-1");
    }

    /// Upserting the same id twice updates in place rather than duplicating
    #[tokio::test]
    #[serial]
    async fn test_upsert_updates_existing_user() {
        init_test_environment().await;

        let user = sample_user("store-test-2", "before@example.com");
        UserStore::upsert_user(user.clone())
            .await
            .expect("Failed to upsert user");

        let mut updated = user;
        updated.identifier = "after@example.com".to_string();
        updated.email = Some("after@example.com".to_string());
        UserStore::upsert_user(updated)
            .await
            .expect("Failed to upsert updated user");

        let stored = UserStore::get_user("store-test-2")
            .await
            .expect("Failed to get user")
            .expect("User missing");
        assert_eq!(stored.identifier, "after@example.com");
        assert!(
            UserStore::get_user_by_identifier("before@example.com")
                .await
                .expect("Failed to query")
                .is_none()
        );
    }

    /// Deleting removes the user; a later lookup returns None
    #[tokio::test]
    #[serial]
    async fn test_delete_user() {
        init_test_environment().await;

        let user = sample_user("store-test-3", "store-test-3@example.com");
        UserStore::upsert_user(user).await.expect("Failed to upsert");

        UserStore::delete_user("store-test-3")
            .await
            .expect("Failed to delete user");

        assert!(
            UserStore::get_user("store-test-3")
                .await
                .expect("Failed to query")
                .is_none()
        );
    }

    /// Unknown lookups return None rather than an error
    #[tokio::test]
    #[serial]
    async fn test_get_unknown_user_returns_none() {
        init_test_environment().await;

        assert!(
            UserStore::get_user("no-such-user")
                .await
                .expect("Failed to query")
                .is_none()
        );
        assert!(
            UserStore::get_user_by_identifier("no-such@example.com")
                .await
                .expect("Failed to query")
                .is_none()
        );
    }
}
