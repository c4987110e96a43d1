use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

/// Sandbox endpoint of the v1 API
pub const DEFAULT_BASE_URL: &str = "https://sandboxapi.ost.com/v1";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone)]
pub struct OstConfig {
    pub api_key: Secret<String>,
    pub api_secret: Secret<String>,
    pub base_url: String,
    pub timeout_seconds: u64,
}

// Custom Serialize implementation - never expose secrets in serialization
impl Serialize for OstConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("OstConfig", 4)?;
        state.serialize_field("api_key", "[REDACTED]")?;
        state.serialize_field("api_secret", "[REDACTED]")?;
        state.serialize_field("base_url", &self.base_url)?;
        state.serialize_field("timeout_seconds", &self.timeout_seconds)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for OstConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct OstConfigHelper {
            api_key: String,
            api_secret: String,
            base_url: Option<String>,
            timeout_seconds: Option<u64>,
        }

        let helper = OstConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            api_key: Secret::new(helper.api_key),
            api_secret: Secret::new(helper.api_secret),
            base_url: helper
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_seconds: helper.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        })
    }
}

impl OstConfig {
    /// Create a new configuration with API credentials against the sandbox
    #[must_use]
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            api_secret: Secret::new(api_secret),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_API_KEY` (e.g., `OST_API_KEY`)
    /// - `{PREFIX}_API_SECRET` (e.g., `OST_API_SECRET`)
    /// - `{PREFIX}_BASE_URL` (optional)
    /// - `{PREFIX}_TIMEOUT_SECONDS` (optional, defaults to 30)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let api_key_var = format!("{}_API_KEY", prefix);
        let api_secret_var = format!("{}_API_SECRET", prefix);
        let base_url_var = format!("{}_BASE_URL", prefix);
        let timeout_var = format!("{}_TIMEOUT_SECONDS", prefix);

        let api_key = env::var(&api_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(api_key_var))?;

        let api_secret = env::var(&api_secret_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(api_secret_var))?;

        let base_url = env::var(&base_url_var).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_seconds = match env::var(&timeout_var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidConfiguration(format!("{}={}: {}", timeout_var, raw, e))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECONDS,
        };

        Ok(Self {
            api_key: Secret::new(api_key),
            api_secret: Secret::new(api_secret),
            base_url,
            timeout_seconds,
        })
    }

    /// Create configuration from a `.env` file and environment variables
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific `.env` file path
    ///
    /// A missing file is not an error; the system environment is used as-is.
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Check if both credentials are present
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.expose_secret().is_empty() && !self.api_secret.expose_secret().is_empty()
    }

    /// Set custom base URL
    #[must_use]
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub const fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Get API key (use carefully - exposes secret)
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Get API secret (use carefully - exposes secret)
    pub fn api_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_redacts_secrets() {
        let config = OstConfig::new("key123".to_string(), "secret456".to_string());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("key123"));
        assert!(!json.contains("secret456"));
        assert!(json.contains("[REDACTED]"));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: OstConfig =
            serde_json::from_str(r#"{"api_key":"k","api_secret":"s"}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.api_key(), "k");
        assert_eq!(config.api_secret(), "s");
    }

    #[test]
    fn test_has_credentials() {
        assert!(OstConfig::new("k".to_string(), "s".to_string()).has_credentials());
        assert!(!OstConfig::new(String::new(), "s".to_string()).has_credentials());
        assert!(!OstConfig::new("k".to_string(), String::new()).has_credentials());
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let config = OstConfig::new("k".to_string(), "s".to_string())
            .base_url("https://api.ost.com/v1/".to_string());
        assert_eq!(config.base_url, "https://api.ost.com/v1");
    }

    #[test]
    fn test_from_env_missing_variable() {
        let result = OstConfig::from_env("OST_CONFIG_TEST_UNSET_PREFIX");
        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvironmentVariable(var)) if var == "OST_CONFIG_TEST_UNSET_PREFIX_API_KEY"
        ));
    }
}
