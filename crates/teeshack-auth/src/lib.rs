//! Mock shopper authentication for TeeShack.
//!
//! Accounts live in an in-memory directory; the signed-in profile is kept in
//! the storefront cache so it survives restarts.

mod directory;
mod error;
mod service;
mod user;

pub use directory::UserDirectory;
pub use error::AuthError;
pub use service::{AuthService, USER_SNAPSHOT_KEY};
pub use user::{avatar_url, Account, UserProfile};
