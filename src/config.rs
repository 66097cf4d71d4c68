//! Persistence of the iLovePDF public key.
//!
//! The key is stored in a small TOML file under the user config
//! directory. `ILOVEPDF_PUBLIC_KEY` in the environment takes precedence
//! over the file, and `PDF_SQUEEZE_CONFIG` relocates the file itself.

use crate::constants::{API_KEY_ENV_VAR, API_KEY_PREFIX, CONFIG_PATH_ENV_VAR};
use crate::error::{Result, SqueezeError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub public_key: String,
}

/// Resolve the config file location.
pub fn config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .ok_or_else(|| {
            SqueezeError::Config("cannot locate config directory: HOME is not set".to_string())
        })?;

    Ok(base.join("pdf-squeeze").join("config.toml"))
}

/// Check the `project_public_` prefix every iLovePDF key carries.
pub fn validate_api_key(key: &str) -> Result<()> {
    if key.starts_with(API_KEY_PREFIX) {
        Ok(())
    } else {
        Err(SqueezeError::InvalidApiKey {
            expected: API_KEY_PREFIX.to_string(),
            got: key.to_string(),
        })
    }
}

/// Persist an API key for later runs. Overwrites any previous key.
pub fn store_api_key(key: &str) -> Result<PathBuf> {
    validate_api_key(key)?;

    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = Config {
        public_key: key.to_string(),
    };
    let body = toml::to_string_pretty(&config)
        .map_err(|e| SqueezeError::Config(format!("failed to serialize config: {e}")))?;
    fs::write(&path, body)?;

    Ok(path)
}

/// Load the API key, preferring the environment over the config file.
pub fn load_api_key() -> Result<String> {
    if let Ok(key) = env::var(API_KEY_ENV_VAR) {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    let path = config_path()?;
    if path.is_file() {
        let body = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&body)
            .map_err(|e| SqueezeError::Config(format!("invalid config file {path:?}: {e}")))?;
        if !config.public_key.is_empty() {
            return Ok(config.public_key);
        }
    }

    Err(SqueezeError::Config(format!(
        "pdf-squeeze needs an iLovePDF public key to access its API. \
         Set one with pdf-squeeze --set-api-key {API_KEY_PREFIX}7af905e... \
         or export {API_KEY_ENV_VAR}"
    )))
}
