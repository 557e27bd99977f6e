//! In-memory account directory.

use crate::user::Account;

/// Accounts the mock backend knows about.
///
/// Seeded with the demo and admin shoppers; registrations are appended for
/// the lifetime of the directory only.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    accounts: Vec<Account>,
}

impl UserDirectory {
    /// Directory with no accounts.
    pub fn empty() -> Self {
        Self {
            accounts: Vec::new(),
        }
    }

    /// Directory holding the built-in demo accounts.
    pub fn seeded() -> Self {
        Self {
            accounts: vec![
                Account::new("1", "demo@teeshack.com", "123456", "Usuario Demo"),
                Account::new("2", "admin@teeshack.com", "admin123", "Administrador"),
            ],
        }
    }

    /// Account with exactly this email and password.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.email == email)
    }

    pub fn insert(&mut self, account: Account) {
        self.accounts.push(account);
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_accounts() {
        let directory = UserDirectory::seeded();
        assert_eq!(directory.len(), 2);
        assert!(directory.authenticate("demo@teeshack.com", "123456").is_some());
        assert!(directory.authenticate("admin@teeshack.com", "admin123").is_some());
    }

    #[test]
    fn test_wrong_password() {
        let directory = UserDirectory::seeded();
        assert!(directory.authenticate("demo@teeshack.com", "654321").is_none());
    }

    #[test]
    fn test_match_is_exact() {
        let directory = UserDirectory::seeded();
        assert!(directory.authenticate("DEMO@teeshack.com", "123456").is_none());
        assert!(directory.find_by_email("demo@teeshack.com").is_some());
    }
}
