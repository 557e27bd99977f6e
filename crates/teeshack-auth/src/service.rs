//! Signed-in user state, persisted in the cache.

use teeshack_cache::Cache;
use teeshack_commerce::ids::UserId;
use tracing::{debug, info, warn};

use crate::directory::UserDirectory;
use crate::error::AuthError;
use crate::user::{Account, UserProfile};

/// Cache key holding the signed-in profile.
pub const USER_SNAPSHOT_KEY: &str = "teeshack_user";

/// Mock authentication backed by a [`UserDirectory`].
///
/// The current user is written under [`USER_SNAPSHOT_KEY`] on login and
/// registration, and restored from it when the service is built.
pub struct AuthService {
    cache: Cache,
    directory: UserDirectory,
    current: Option<UserProfile>,
}

impl AuthService {
    /// Service over the seeded directory.
    pub fn restore(cache: Cache) -> Self {
        Self::with_directory(cache, UserDirectory::seeded())
    }

    pub fn with_directory(cache: Cache, directory: UserDirectory) -> Self {
        let current = match cache.get::<UserProfile>(USER_SNAPSHOT_KEY) {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "discarding unreadable user snapshot");
                None
            }
        };
        Self {
            cache,
            directory,
            current,
        }
    }

    /// Sign in with an existing account.
    pub fn login(&mut self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let profile = self
            .directory
            .authenticate(email.trim(), password)
            .map(Account::profile)
            .ok_or(AuthError::InvalidCredentials)?;

        self.sign_in(profile)
    }

    /// Create an account and sign in with it.
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserProfile, AuthError> {
        let email = email.trim();
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingField("name"));
        }
        if email.is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        if self.directory.find_by_email(email).is_some() {
            return Err(AuthError::UserAlreadyExists(email.to_string()));
        }

        let account = Account::new(UserId::generate(), email, password, name);
        let profile = account.profile();
        self.directory.insert(account);
        info!(email, "registered user");

        self.sign_in(profile)
    }

    /// Sign out. Signing out while signed out is not an error.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.cache.delete(USER_SNAPSHOT_KEY)?;
        if let Some(profile) = self.current.take() {
            info!(email = %profile.email, "signed out");
        }
        Ok(())
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    fn sign_in(&mut self, profile: UserProfile) -> Result<UserProfile, AuthError> {
        self.cache.set(USER_SNAPSHOT_KEY, &profile)?;
        debug!(email = %profile.email, "signed in");
        self.current = Some(profile.clone());
        Ok(profile)
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("accounts", &self.directory.len())
            .field("current", &self.current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_persists_profile() {
        let cache = Cache::in_memory();
        let mut auth = AuthService::restore(cache.clone());

        let profile = auth.login("demo@teeshack.com", "123456").unwrap();
        assert_eq!(profile.name, "Usuario Demo");
        assert!(auth.is_authenticated());

        let stored: UserProfile = cache.get(USER_SNAPSHOT_KEY).unwrap().unwrap();
        assert_eq!(stored, profile);
    }

    #[test]
    fn test_login_rejects_bad_password() {
        let cache = Cache::in_memory();
        let mut auth = AuthService::restore(cache.clone());

        let err = auth.login("demo@teeshack.com", "nope").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(err.is_auth_failure());
        assert!(auth.current_user().is_none());
        assert!(!cache.exists(USER_SNAPSHOT_KEY).unwrap());
    }

    #[test]
    fn test_register_then_login() {
        let mut auth = AuthService::restore(Cache::in_memory());

        let profile = auth.register("ana@example.com", "secret", "Ana").unwrap();
        assert_eq!(profile.email, "ana@example.com");
        assert_eq!(profile.id.as_str().len(), 16);

        auth.logout().unwrap();
        let again = auth.login("ana@example.com", "secret").unwrap();
        assert_eq!(again.id, profile.id);
    }

    #[test]
    fn test_register_existing_email() {
        let mut auth = AuthService::restore(Cache::in_memory());
        let err = auth.register("demo@teeshack.com", "x", "Otro").unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists(_)));
    }

    #[test]
    fn test_register_blank_name() {
        let mut auth = AuthService::restore(Cache::in_memory());
        let err = auth.register("new@example.com", "x", "  ").unwrap_err();
        assert!(matches!(err, AuthError::MissingField("name")));
    }

    #[test]
    fn test_logout_removes_snapshot() {
        let cache = Cache::in_memory();
        let mut auth = AuthService::restore(cache.clone());
        auth.login("admin@teeshack.com", "admin123").unwrap();

        auth.logout().unwrap();
        assert!(auth.current_user().is_none());
        assert!(!cache.exists(USER_SNAPSHOT_KEY).unwrap());

        auth.logout().unwrap();
    }

    #[test]
    fn test_corrupt_snapshot_is_signed_out() {
        let cache = Cache::in_memory();
        cache.set(USER_SNAPSHOT_KEY, "not a profile").unwrap();

        let auth = AuthService::restore(cache);
        assert!(!auth.is_authenticated());
    }
}
