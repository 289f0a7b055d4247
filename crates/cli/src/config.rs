//! CLI configuration utilities

use anyhow::Result;
use gallery_frontend_common::AuthConfig;
use gallery_http::client::ClientConfig;
use gallery_http::client::config::ENV_PREFIX;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const STATE_DIR_ENV: &str = "GALLERY_STATE_DIR";

const CONFIG_FILE: &str = "config.toml";

/// Explicit flag, then `GALLERY_STATE_DIR`, then the platform data dir
pub fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os(STATE_DIR_ENV).map(PathBuf::from))
        .or_else(|| {
            directories::ProjectDirs::from("", "", AuthConfig::APP_NAME)
                .map(|dirs| dirs.data_dir().to_path_buf())
        })
        .unwrap_or_else(|| PathBuf::from(".").join(AuthConfig::APP_NAME))
}

/// Defaults, then `<data_dir>/config.toml`, then `GALLERY_*` variables, then
/// the `--backend` flag
pub fn load_client_config(data_dir: &Path, backend: Option<String>) -> Result<ClientConfig> {
    let environment = config::Environment::with_prefix(ENV_PREFIX).try_parsing(true);
    let config_file = data_dir.join(CONFIG_FILE);
    let mut client_config = ClientConfig::load_from(Some(config_file.as_path()), environment)?;

    if let Some(backend) = backend {
        client_config.backend_host = backend;
    }

    Ok(client_config)
}
