//! Client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use super::ClientError;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

/// Environment prefix for runtime overrides (`GALLERY_BACKEND_HOST`, ...)
pub const ENV_PREFIX: &str = "GALLERY";

const DEFAULT_BACKEND_HOST: &str = "http://localhost:6060";
const DEFAULT_IMAGE_HOST: &str = "http://localhost:3030";

/// Hosts the front-end talks to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API backend base URL
    pub backend_host: String,
    /// Image host base URL
    pub image_host: String,
    /// Request timeout in seconds, native targets only
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    /// Build-time environment wins over the compiled-in hosts, so a wasm
    /// bundle can be pointed at another backend without code changes.
    fn default() -> Self {
        Self {
            backend_host: option_env!("GALLERY_BACKEND_HOST")
                .unwrap_or(DEFAULT_BACKEND_HOST)
                .to_string(),
            image_host: option_env!("GALLERY_IMAGE_HOST")
                .unwrap_or(DEFAULT_IMAGE_HOST)
                .to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Defaults overlaid with `GALLERY_*` variables from the process environment
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ClientError> {
        Self::load_from(
            None,
            config::Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        )
    }

    /// Defaults, then the optional config file, then `environment`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(
        file: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, ClientError> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default("backend_host", defaults.backend_host)
            .and_then(|builder| builder.set_default("image_host", defaults.image_host))
            .map_err(config_error)?;

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder
            .add_source(environment)
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(config_error)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn config_error(e: config::ConfigError) -> ClientError {
    ClientError::Configuration(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_timeout_zero_means_none() {
        let mut config = ClientConfig::default();
        assert_eq!(config.timeout(), None);

        config.timeout_secs = Some(0);
        assert_eq!(config.timeout(), None);

        config.timeout_secs = Some(7);
        assert_eq!(config.timeout(), Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_load_from_environment_overrides() {
        let vars = HashMap::from([
            (
                "GALLERY_BACKEND_HOST".to_string(),
                "https://api.example.com".to_string(),
            ),
            ("GALLERY_TIMEOUT_SECS".to_string(), "12".to_string()),
        ]);
        let environment = config::Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(vars));

        let config = ClientConfig::load_from(None, environment).unwrap();
        assert_eq!(config.backend_host, "https://api.example.com");
        assert_eq!(config.image_host, ClientConfig::default().image_host);
        assert_eq!(config.timeout_secs, Some(12));
    }

    #[test]
    fn test_load_from_empty_environment_uses_defaults() {
        let environment =
            config::Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()));
        let config = ClientConfig::load_from(None, environment).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_environment_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "backend_host = \"https://file.example.com\"\nimage_host = \"https://img.example.com\"\n",
        )
        .unwrap();

        let vars = HashMap::from([(
            "GALLERY_BACKEND_HOST".to_string(),
            "https://env.example.com".to_string(),
        )]);
        let environment = config::Environment::with_prefix(ENV_PREFIX).source(Some(vars));

        let config = ClientConfig::load_from(Some(path.as_path()), environment).unwrap();
        assert_eq!(config.backend_host, "https://env.example.com");
        assert_eq!(config.image_host, "https://img.example.com");
    }

    #[test]
    fn test_missing_config_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let environment =
            config::Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()));

        let absent = dir.path().join("absent.toml");
        let config = ClientConfig::load_from(Some(absent.as_path()), environment).unwrap();
        assert_eq!(config, ClientConfig::default());
    }
}
