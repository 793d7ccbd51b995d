//! Plaintext credential gate over the user store.

use crate::error::MedcheckError;
use crate::model::Credential;
use crate::store::UserStore;
use tracing::{info, warn};

/// Register a new operator.
///
/// Both fields must be non-blank. The username is stored trimmed and must not
/// already exist; on any error the store is left untouched.
pub fn register(store: &UserStore, username: &str, password: &str) -> Result<(), MedcheckError> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        return Err(MedcheckError::MissingFields);
    }

    let mut users = store.load()?;
    if users.iter().any(|u| u.username == username) {
        return Err(MedcheckError::DuplicateUser {
            username: username.to_string(),
        });
    }

    users.push(Credential {
        username: username.to_string(),
        password: password.to_string(),
    });
    store.save(&users)?;

    info!(%username, "registered user");
    Ok(())
}

/// Check a username/password pair against the store.
pub fn login(store: &UserStore, username: &str, password: &str) -> Result<(), MedcheckError> {
    let username = username.trim();
    let users = store.load()?;
    if users
        .iter()
        .any(|u| u.username == username && u.password == password)
    {
        info!(%username, "login succeeded");
        Ok(())
    } else {
        warn!(%username, "login failed");
        Err(MedcheckError::AuthFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, UserStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::new(dir.path().join("users.csv"));
        store.ensure_exists().unwrap();
        (dir, store)
    }

    #[test]
    fn test_register_then_login() {
        let (_dir, store) = store();
        register(&store, "nurse", "hunter2").unwrap();
        login(&store, "nurse", "hunter2").unwrap();
    }

    #[test]
    fn test_register_trims_username() {
        let (_dir, store) = store();
        register(&store, "  nurse ", "hunter2").unwrap();
        assert_eq!(store.load().unwrap()[0].username, "nurse");
        login(&store, "nurse", "hunter2").unwrap();
    }

    #[test]
    fn test_duplicate_username_leaves_store_unchanged() {
        let (_dir, store) = store();
        register(&store, "nurse", "first").unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();

        let err = register(&store, "nurse", "second").unwrap_err();
        assert!(matches!(err, MedcheckError::DuplicateUser { ref username } if username == "nurse"));

        let after = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_missing_fields() {
        let (_dir, store) = store();
        assert!(matches!(
            register(&store, "", "pw"),
            Err(MedcheckError::MissingFields)
        ));
        assert!(matches!(
            register(&store, "nurse", "   "),
            Err(MedcheckError::MissingFields)
        ));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_wrong_password_fails() {
        let (_dir, store) = store();
        register(&store, "nurse", "hunter2").unwrap();
        assert!(matches!(
            login(&store, "nurse", "hunter3"),
            Err(MedcheckError::AuthFailed)
        ));
        assert!(matches!(
            login(&store, "doctor", "hunter2"),
            Err(MedcheckError::AuthFailed)
        ));
    }
}
