//! Frontend configuration

/// Authentication configuration
pub struct AuthConfig;

impl AuthConfig {
    /// Storage key holding the JSON-encoded token
    pub const TOKEN_KEY: &'static str = "token";

    /// Application name used for platform data directories
    pub const APP_NAME: &'static str = "gallery";

    /// File name of the native key-value store
    pub const STORAGE_FILE: &'static str = "storage.json";
}
