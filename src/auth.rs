//! Session service
//!
//! One service owns the process-wide session: it is restored from
//! persistence at construction, replaced by a successful login, and
//! cleared on logout. Callers receive the service by reference instead
//! of reading ambient global state.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::{Role, User};
use crate::store::{keys, load_json, persist_json, KeyValueBackend};

/// A login account in the user directory.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub email: String,
    pub password: String,
    pub user: User,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
}

/// Demo directory used when no external identity provider is wired in.
pub fn demo_accounts() -> Vec<UserAccount> {
    vec![
        UserAccount {
            email: "admin@waterguard.example".to_string(),
            password: "demo123".to_string(),
            user: User {
                id: "1".to_string(),
                email: "admin@waterguard.example".to_string(),
                name: "Admin".to_string(),
                role: Role::SuperAdmin,
            },
        },
        UserAccount {
            email: "manager@waterguard.example".to_string(),
            password: "demo123".to_string(),
            user: User {
                id: "2".to_string(),
                email: "manager@waterguard.example".to_string(),
                name: "Site Manager".to_string(),
                role: Role::Manager,
            },
        },
        UserAccount {
            email: "tech@waterguard.example".to_string(),
            password: "demo123".to_string(),
            user: User {
                id: "3".to_string(),
                email: "tech@waterguard.example".to_string(),
                name: "Field Technician".to_string(),
                role: Role::Technician,
            },
        },
    ]
}

/// Holds the current session and the account directory it is checked
/// against.
pub struct SessionService {
    backend: Arc<dyn KeyValueBackend>,
    directory: Vec<UserAccount>,
    session: RwLock<Option<User>>,
}

impl SessionService {
    /// Restore any persisted session and authenticate against the demo
    /// directory.
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self::with_directory(backend, demo_accounts())
    }

    pub fn with_directory(backend: Arc<dyn KeyValueBackend>, directory: Vec<UserAccount>) -> Self {
        let session = load_json(&*backend, keys::SESSION);

        Self {
            backend,
            directory,
            session: RwLock::new(session),
        }
    }

    /// Authenticate and open a session. Credentials are matched against
    /// the directory; a mismatch surfaces as an explicit error and
    /// leaves any existing session untouched.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let account = self
            .directory
            .iter()
            .find(|account| account.email == email && account.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        let mut session = self.session.write();
        *session = Some(account.user.clone());
        persist_json(&*self.backend, keys::SESSION, &account.user);

        Ok(account.user.clone())
    }

    /// Close the session and remove it from persistence.
    pub fn logout(&self) {
        let mut session = self.session.write();
        *session = None;

        if let Err(e) = self.backend.delete(keys::SESSION) {
            tracing::warn!(error = %e, "Failed to clear persisted session");
        }
    }

    /// The logged-in user, if any.
    pub fn current(&self) -> Option<User> {
        self.session.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;

    #[test]
    fn test_login_with_valid_credentials() {
        let service = SessionService::new(Arc::new(MemoryBackend::new()));

        let user = service
            .login("tech@waterguard.example", "demo123")
            .unwrap();
        assert_eq!(user.role, Role::Technician);
        assert_eq!(service.current().unwrap().email, user.email);
    }

    #[test]
    fn test_login_failure_leaves_no_session() {
        let service = SessionService::new(Arc::new(MemoryBackend::new()));

        let result = service.login("tech@waterguard.example", "wrong");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert!(service.current().is_none());
    }

    #[test]
    fn test_session_restored_from_persistence() {
        let backend = Arc::new(MemoryBackend::new());

        let service = SessionService::new(backend.clone());
        service
            .login("manager@waterguard.example", "demo123")
            .unwrap();

        let restored = SessionService::new(backend);
        assert_eq!(restored.current().unwrap().role, Role::Manager);
    }

    #[test]
    fn test_logout_clears_persisted_session() {
        let backend = Arc::new(MemoryBackend::new());

        let service = SessionService::new(backend.clone());
        service
            .login("admin@waterguard.example", "demo123")
            .unwrap();
        service.logout();

        assert!(service.current().is_none());
        let restored = SessionService::new(backend);
        assert!(restored.current().is_none());
    }
}
