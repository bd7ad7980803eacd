use super::{RepositoryError, UserRepository};
use crate::account::{Account, Profile, UserId};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Keeps everything in process memory. Data is lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    tables: RwLock<Tables>,
}

/// Both tables live behind a single lock so that an insert can check the
/// email and write both records without anyone else getting in between.
#[derive(Debug, Default)]
struct Tables {
    /// Accounts, keyed by email.
    accounts: HashMap<String, Account>,

    /// Profiles, keyed by their owner.
    profiles: HashMap<UserId, Profile>,
}

impl InMemoryUserRepository {
    /// An empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many accounts exist.
    pub async fn account_count(&self) -> usize {
        self.tables.read().await.accounts.len()
    }

    /// How many profiles exist.
    pub async fn profile_count(&self) -> usize {
        self.tables.read().await.profiles.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError> {
        Ok(self.tables.read().await.accounts.get(email).cloned())
    }

    async fn insert_account_and_profile(
        &self,
        account: Account,
        profile: Profile,
    ) -> Result<Account, RepositoryError> {
        if profile.user_id() != account.user_id || profile.role() != account.role {
            return Err(RepositoryError::Storage(
                "profile does not belong to account".to_string(),
            ));
        }

        let mut tables = self.tables.write().await;

        if tables.accounts.contains_key(&account.email) {
            return Err(RepositoryError::EmailTaken);
        }

        tables.profiles.insert(account.user_id, profile);
        tables.accounts.insert(account.email.clone(), account.clone());

        Ok(account)
    }

    async fn find_profile(&self, user_id: &UserId) -> Result<Option<Profile>, RepositoryError> {
        Ok(self.tables.read().await.profiles.get(user_id).cloned())
    }
}
