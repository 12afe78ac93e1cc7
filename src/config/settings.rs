use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the server, authentication, and the message feed.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub feed: FeedSettings,
}

/// Configuration settings for the server.
///
/// `idle_timeout_secs` closes connections with no inbound traffic for that
/// long; 0 disables the timeout.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub idle_timeout_secs: u64,
}

/// Configuration settings for authentication: the token signing secret and
/// how long issued tokens stay valid.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

/// Configuration settings for the feed: where the message log lives and the
/// maximum accepted body length.
#[derive(Debug, Deserialize, Clone)]
pub struct FeedSettings {
    pub data_dir: String,
    pub max_body_chars: usize,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub auth: Option<PartialAuthSettings>,
    pub feed: Option<PartialFeedSettings>,
}

/// Partial server settings.
#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub idle_timeout_secs: Option<u64>,
}

/// Partial auth settings.
#[derive(Debug, Deserialize)]
pub struct PartialAuthSettings {
    pub jwt_secret: Option<String>,
    pub token_ttl_secs: Option<u64>,
}

/// Partial feed settings.
#[derive(Debug, Deserialize)]
pub struct PartialFeedSettings {
    pub data_dir: Option<String>,
    pub max_body_chars: Option<usize>,
}

/// Provides default values for `Settings`.
///
/// Ensures the application has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
                idle_timeout_secs: 0,
            },
            auth: AuthSettings {
                jwt_secret: "parley_dev_secret".to_string(),
                token_ttl_secs: 86400,
            },
            feed: FeedSettings {
                data_dir: "parley_db".to_string(),
                max_body_chars: 2000,
            },
        }
    }
}
