//! Authentication service implementation
//!
//! A single administrator account, configured in settings, guards the
//! console. A successful login yields a [`Session`] marker; the record
//! controllers never see credentials.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use crate::config::AdminConfig;
use crate::utils::errors::{DriveDeskError, Result};

/// Proof of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub started_at: DateTime<Utc>,
}

/// Authentication service for the administrator account
#[derive(Clone)]
pub struct AuthService {
    admin: AdminConfig,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(admin: AdminConfig) -> Self {
        Self { admin }
    }

    /// Check a username/password pair against the configured account
    pub fn check_credentials(&self, username: &str, password: &str) -> bool {
        !self.admin.password.is_empty()
            && constant_time_eq(username.trim().as_bytes(), self.admin.username.as_bytes())
            && constant_time_eq(password.as_bytes(), self.admin.password.as_bytes())
    }

    /// Log in, returning a session marker on success
    pub fn login(&self, username: &str, password: &str) -> Result<Session> {
        if !self.check_credentials(username, password) {
            warn!(username = username, "Rejected login attempt");
            return Err(DriveDeskError::Authentication(
                "Incorrect username or password".to_string(),
            ));
        }

        info!(username = username, "Administrator logged in");
        Ok(Session {
            username: username.trim().to_string(),
            started_at: Utc::now(),
        })
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(password: &str) -> AuthService {
        AuthService::new(AdminConfig {
            username: "admin".to_string(),
            password: password.to_string(),
        })
    }

    #[test]
    fn test_check_credentials() {
        let auth = service("password");
        assert!(auth.check_credentials("admin", "password"));
        assert!(auth.check_credentials(" admin ", "password"));
        assert!(!auth.check_credentials("admin", "Password"));
        assert!(!auth.check_credentials("root", "password"));
    }

    #[test]
    fn test_empty_configured_password_never_matches() {
        let auth = service("");
        assert!(!auth.check_credentials("admin", ""));
    }

    #[test]
    fn test_login_returns_session() {
        let auth = service("password");
        let session = auth.login("admin", "password").unwrap();
        assert_eq!(session.username, "admin");
        assert!(matches!(
            auth.login("admin", "nope"),
            Err(DriveDeskError::Authentication(_))
        ));
    }
}
