use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory created under the platform data directory.
pub const APP_DIR: &str = "dog_store";
/// File name of the database inside [`APP_DIR`].
pub const DB_FILE_NAME: &str = "doggie_database.db";

/// Dog store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Resolves the default database path from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let data_dir = platform_data_dir(&env_map)?;
        Ok(Self::new(data_dir.join(APP_DIR).join(DB_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }
}

fn required(env_map: &HashMap<String, String>, key: &str) -> Result<PathBuf, ConfigError> {
    env_map
        .get(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| ConfigError::MissingEnv(key.to_string()))
}

#[cfg(windows)]
fn platform_data_dir(env_map: &HashMap<String, String>) -> Result<PathBuf, ConfigError> {
    required(env_map, "APPDATA")
}

#[cfg(target_os = "macos")]
fn platform_data_dir(env_map: &HashMap<String, String>) -> Result<PathBuf, ConfigError> {
    Ok(required(env_map, "HOME")?
        .join("Library")
        .join("Application Support"))
}

#[cfg(not(any(windows, target_os = "macos")))]
fn platform_data_dir(env_map: &HashMap<String, String>) -> Result<PathBuf, ConfigError> {
    // Relative XDG_DATA_HOME values are invalid and must be ignored.
    match required(env_map, "XDG_DATA_HOME") {
        Ok(dir) if dir.is_absolute() => Ok(dir),
        _ => Ok(required(env_map, "HOME")?.join(".local").join("share")),
    }
}
