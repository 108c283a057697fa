use crate::connectors::ConnectorConfig;
use serde;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub app_port: u16,
    pub app_host: String,
    pub auth: AuthSettings,
    #[serde(default)]
    pub connectors: ConnectorConfig,
    #[serde(default)]
    pub limits: LimitSettings,
    /// Fallback for the `DEFAULT_MODEL` environment variable.
    pub default_model: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AuthSettings {
    /// Base URL of the auth server, e.g. http://localhost:54321
    pub url: String,
    /// Public (anon) API key sent alongside user tokens
    #[serde(default)]
    pub anon_key: Option<String>,
    /// Cookie carrying the session access token
    #[serde(default = "AuthSettings::default_cookie_name")]
    pub cookie_name: String,
    /// How long a validated token is trusted without asking the auth server again
    #[serde(default = "AuthSettings::default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl AuthSettings {
    fn default_cookie_name() -> String {
        "access_token".to_string()
    }

    const fn default_cache_ttl_secs() -> u64 {
        60
    }

    pub fn user_url(&self) -> String {
        format!("{}/auth/v1/user", self.url.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct LimitSettings {
    #[serde(default = "LimitSettings::default_max_label_size")]
    pub max_label_size: usize,
    #[serde(default = "LimitSettings::default_max_file_size_mb")]
    pub max_file_size_mb: u64,
    #[serde(default = "LimitSettings::default_max_avatar_size_mb")]
    pub max_avatar_size_mb: u64,
}

impl LimitSettings {
    const fn default_max_label_size() -> usize {
        100
    }

    const fn default_max_file_size_mb() -> u64 {
        5
    }

    const fn default_max_avatar_size_mb() -> u64 {
        5
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size_mb * 1_000_000
    }

    pub fn max_avatar_size(&self) -> u64 {
        self.max_avatar_size_mb * 1_000_000
    }

    /// JSON body limit for the upload and assistant form scopes. Files travel
    /// base64 encoded, so a file up to twice the larger cap still reaches
    /// validation and gets the size message.
    pub fn json_body_limit(&self) -> usize {
        let largest = self.max_file_size().max(self.max_avatar_size());
        (largest * 2 * 4 / 3) as usize + 64 * 1024
    }
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            max_label_size: Self::default_max_label_size(),
            max_file_size_mb: Self::default_max_file_size_mb(),
            max_avatar_size_mb: Self::default_max_avatar_size_mb(),
        }
    }
}

impl DatabaseSettings {
    // Connection string: postgresql://<username>:<password>@<host>:<port>/<database_name>
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name,
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port,
        )
    }
}

impl Settings {
    /// Model identifier for new and updated assistants. Read on every call so
    /// a changed environment takes effect without a restart.
    pub fn current_model(&self) -> String {
        std::env::var("DEFAULT_MODEL")
            .ok()
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| self.default_model.clone())
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    config::Config::builder()
        .add_source(config::File::with_name("configuration"))
        // APP__AUTH__URL=... overrides auth.url
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_have_defaults() {
        let limits = LimitSettings::default();
        assert_eq!(limits.max_label_size, 100);
        assert_eq!(limits.max_file_size(), 5_000_000);
        // base64 of a 10 MB file plus envelope
        assert!(limits.json_body_limit() > 13_333_336 + 1_000);
    }

    #[test]
    fn user_url_strips_trailing_slash() {
        let auth = AuthSettings {
            url: "http://localhost:54321/".to_string(),
            anon_key: None,
            cookie_name: AuthSettings::default_cookie_name(),
            cache_ttl_secs: 60,
        };
        assert_eq!(auth.user_url(), "http://localhost:54321/auth/v1/user");
    }
}
