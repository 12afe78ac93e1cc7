//! Credential resolution
//!
//! `IdentityVerifier` is the capability the feed consumes: an opaque bearer
//! credential in, a stable identity out. Keeping it a trait keeps the feed
//! testable with a stub and leaves room to swap the token scheme without
//! touching the write path.
//!
//! `TokenAuthority` is the concrete implementation: it signs and validates
//! JWTs carrying the user id, display name, and expiry.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::utils::error::FeedError;

/// A resolved user identity. `user_id` is stable for the account's lifetime;
/// `display_name` is what shows up as a message author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub display_name: String,
}

/// Maps an opaque credential to a stable identity. Resolution is atomic and
/// nothing is cached across calls.
pub trait IdentityVerifier: Send + Sync {
    fn resolve(&self, credential: &str) -> Result<Identity, FeedError>;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct TokenAuthority {
    secret: String,
    token_ttl_secs: u64,
}

impl TokenAuthority {
    pub fn new(secret: &str, token_ttl_secs: u64) -> Self {
        Self {
            secret: secret.to_string(),
            token_ttl_secs,
        }
    }

    /// Issue a bearer token for `identity`, valid for the configured TTL.
    pub fn issue(&self, identity: &Identity) -> Result<String, FeedError> {
        let claims = Claims {
            sub: identity.user_id.clone(),
            name: identity.display_name.clone(),
            exp: (Utc::now() + chrono::Duration::seconds(self.token_ttl_secs as i64)).timestamp()
                as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| FeedError::Auth(format!("failed to issue token: {e}")))
    }
}

impl IdentityVerifier for TokenAuthority {
    fn resolve(&self, credential: &str) -> Result<Identity, FeedError> {
        if credential.is_empty() {
            return Err(FeedError::Auth("missing credential".into()));
        }
        let data = decode::<Claims>(
            credential,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|e| FeedError::Auth(format!("invalid credential: {e}")))?;

        if data.claims.sub.is_empty() || data.claims.name.is_empty() {
            return Err(FeedError::Auth("credential carries no identity".into()));
        }

        Ok(Identity {
            user_id: data.claims.sub,
            display_name: data.claims.name,
        })
    }
}
