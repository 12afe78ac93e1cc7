mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{AuthSettings, FeedSettings, ServerSettings, Settings};

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the server, auth, and feed configurations
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("_"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        server: ServerSettings {
            host: partial
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            port: partial
                .server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or(default.server.port),
            idle_timeout_secs: partial
                .server
                .as_ref()
                .and_then(|s| s.idle_timeout_secs)
                .unwrap_or(default.server.idle_timeout_secs),
        },
        auth: AuthSettings {
            jwt_secret: partial
                .auth
                .as_ref()
                .and_then(|a| a.jwt_secret.clone())
                .unwrap_or(default.auth.jwt_secret),
            token_ttl_secs: partial
                .auth
                .as_ref()
                .and_then(|a| a.token_ttl_secs)
                .unwrap_or(default.auth.token_ttl_secs),
        },
        feed: FeedSettings {
            data_dir: partial
                .feed
                .as_ref()
                .and_then(|f| f.data_dir.clone())
                .unwrap_or(default.feed.data_dir),
            max_body_chars: partial
                .feed
                .as_ref()
                .and_then(|f| f.max_body_chars)
                .unwrap_or(default.feed.max_body_chars),
        },
    })
}
