use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

use super::{AccountDirectory, Claims, Identity, IdentityVerifier, TokenAuthority};
use crate::utils::error::FeedError;

fn authority() -> TokenAuthority {
    TokenAuthority::new("test_secret", 3600)
}

fn identity(name: &str) -> Identity {
    Identity {
        user_id: format!("id-{name}"),
        display_name: name.to_string(),
    }
}

#[test]
fn test_issue_and_resolve_roundtrip() {
    let authority = authority();
    let token = authority.issue(&identity("alice")).unwrap();

    let resolved = authority.resolve(&token).unwrap();
    assert_eq!(resolved, identity("alice"));
}

#[test]
fn test_resolve_rejects_empty_credential() {
    let err = authority().resolve("").unwrap_err();
    assert!(matches!(err, FeedError::Auth(_)));
}

#[test]
fn test_resolve_rejects_garbage() {
    let err = authority().resolve("not.a.token").unwrap_err();
    assert!(matches!(err, FeedError::Auth(_)));
}

#[test]
fn test_resolve_rejects_token_from_other_secret() {
    let token = TokenAuthority::new("other_secret", 3600)
        .issue(&identity("alice"))
        .unwrap();
    let err = authority().resolve(&token).unwrap_err();
    assert!(matches!(err, FeedError::Auth(_)));
}

#[test]
fn test_resolve_rejects_expired_token() {
    // Expired two hours ago, well past any validation leeway.
    let claims = Claims {
        sub: "id-alice".to_string(),
        name: "alice".to_string(),
        exp: (Utc::now().timestamp() - 7200) as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret("test_secret".as_ref()),
    )
    .unwrap();

    let err = authority().resolve(&token).unwrap_err();
    assert!(matches!(err, FeedError::Auth(_)));
}

#[test]
fn test_resolve_rejects_token_without_identity() {
    // Validly signed, but names nobody.
    let claims = Claims {
        sub: String::new(),
        name: String::new(),
        exp: (Utc::now().timestamp() + 3600) as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret("test_secret".as_ref()),
    )
    .unwrap();

    let err = authority().resolve(&token).unwrap_err();
    assert!(matches!(err, FeedError::Auth(_)));
}

#[test]
fn test_signup_and_login() {
    let directory = AccountDirectory::new();
    directory.signup("alice", "hunter2").unwrap();

    let identity = directory.login("alice", "hunter2").unwrap();
    assert_eq!(identity.display_name, "alice");
    assert!(!identity.user_id.is_empty());
}

#[test]
fn test_login_identity_is_stable() {
    let directory = AccountDirectory::new();
    directory.signup("alice", "hunter2").unwrap();

    let first = directory.login("alice", "hunter2").unwrap();
    let second = directory.login("alice", "hunter2").unwrap();
    assert_eq!(first.user_id, second.user_id);
}

#[test]
fn test_login_rejects_wrong_password() {
    let directory = AccountDirectory::new();
    directory.signup("alice", "hunter2").unwrap();

    let err = directory.login("alice", "wrong").unwrap_err();
    assert!(matches!(err, FeedError::Auth(_)));
}

#[test]
fn test_login_rejects_unknown_user() {
    let directory = AccountDirectory::new();
    let err = directory.login("nobody", "whatever").unwrap_err();
    assert!(matches!(err, FeedError::Auth(_)));
}

#[test]
fn test_signup_rejects_taken_username() {
    let directory = AccountDirectory::new();
    directory.signup("alice", "hunter2").unwrap();

    let err = directory.signup("alice", "other").unwrap_err();
    assert!(matches!(err, FeedError::Validation(_)));
}

#[test]
fn test_signup_requires_username_and_password() {
    let directory = AccountDirectory::new();

    for (username, password) in [("", "pw"), ("   ", "pw"), ("alice", "")] {
        let err = directory.signup(username, password).unwrap_err();
        assert!(matches!(err, FeedError::Validation(_)), "{username:?}/{password:?}");
    }
}
