//! Account directory
//!
//! A minimal username/password directory standing in for a full identity
//! provider: signup trusts the caller (no email confirmation) and passwords
//! are compared verbatim. Production deployments should front the room with
//! a real identity service and keep this only for development.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Mutex;

use uuid::Uuid;

use crate::auth::token::Identity;
use crate::utils::error::FeedError;

#[derive(Debug)]
struct Account {
    user_id: String,
    password: String,
}

#[derive(Debug, Default)]
pub struct AccountDirectory {
    accounts: Mutex<HashMap<String, Account>>,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account. Usernames are trimmed and must be unique.
    pub fn signup(&self, username: &str, password: &str) -> Result<(), FeedError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(FeedError::Validation(
                "username and password are required".into(),
            ));
        }

        let mut accounts = self.accounts.lock().unwrap();
        match accounts.entry(username.to_string()) {
            Entry::Occupied(_) => Err(FeedError::Validation("username already taken".into())),
            Entry::Vacant(slot) => {
                slot.insert(Account {
                    user_id: Uuid::new_v4().to_string(),
                    password: password.to_string(),
                });
                Ok(())
            }
        }
    }

    /// Verify a username/password pair and return the account's identity.
    pub fn login(&self, username: &str, password: &str) -> Result<Identity, FeedError> {
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(username.trim()) {
            Some(account) if account.password == password => Ok(Identity {
                user_id: account.user_id.clone(),
                display_name: username.trim().to_string(),
            }),
            _ => Err(FeedError::Auth("invalid credentials".into())),
        }
    }
}
