use crate::account::{Account, Profile, UserId};
use async_trait::async_trait;

/// An in-memory store, for development and tests.
pub mod memory;
pub use memory::InMemoryUserRepository;

/// Things that can go wrong while talking to storage.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// Some account already uses this email. Nothing was written.
    #[error("an account with this email already exists")]
    EmailTaken,

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Storage for accounts and their profiles.
///
/// Implementations must serialize conflicting writes: two concurrent inserts
/// with the same email must never both succeed.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up an account by exact email.
    ///
    /// ## Errors
    ///
    /// `RepositoryError::Storage` if the backing store fails.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError>;

    /// Store an account and its profile together. Either both are stored or
    /// neither is.
    ///
    /// ## Errors
    ///
    /// - `RepositoryError::EmailTaken` if the email is already in use
    /// - `RepositoryError::Storage` if the backing store fails
    async fn insert_account_and_profile(
        &self,
        account: Account,
        profile: Profile,
    ) -> Result<Account, RepositoryError>;

    /// Get the profile belonging to an account.
    ///
    /// ## Errors
    ///
    /// `RepositoryError::Storage` if the backing store fails.
    async fn find_profile(&self, user_id: &UserId) -> Result<Option<Profile>, RepositoryError>;
}
