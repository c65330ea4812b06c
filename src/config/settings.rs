//! Profile settings for connecting to the Rackforge API.
//!
//! Settings live in a YAML file under the user's home directory and hold
//! one or more named profiles, each with an endpoint and an API token.
//! Environment variables override whatever a profile says.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::api::DEFAULT_ENDPOINT;
use crate::error::{ConfigError, RackforgeError, Result};

/// Environment variable holding the API token.
pub const ENV_API_TOKEN: &str = "RACKFORGE_API_TOKEN";

/// Environment variable overriding the API endpoint.
pub const ENV_ENDPOINT: &str = "RACKFORGE_ENDPOINT";

/// Name of the profile used when none is selected.
const DEFAULT_PROFILE: &str = "default";

/// Settings file location relative to the home directory.
const SETTINGS_RELATIVE_PATH: &str = ".rackforge/config.yaml";

/// The persisted settings file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Profile used when `--profile` is not given.
    #[serde(default = "default_profile_name")]
    pub active_profile: String,
    /// Named connection profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// One named connection profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// API endpoint override for this profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// API token for this profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Default profile name for serde.
fn default_profile_name() -> String {
    String::from(DEFAULT_PROFILE)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            active_profile: default_profile_name(),
            profiles: HashMap::new(),
        }
    }
}

impl Settings {
    /// Returns the default settings file path under the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(SETTINGS_RELATIVE_PATH))
            .ok_or_else(|| RackforgeError::internal("Cannot determine home directory"))
    }

    /// Loads settings from a YAML file, or defaults when it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Settings file not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let settings = serde_yaml::from_str(&content).map_err(|e| {
            RackforgeError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location: path.display().to_string(),
            })
        })?;

        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Writes settings to a YAML file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self).map_err(|e| {
            RackforgeError::Config(ConfigError::ParseError {
                message: format!("YAML serialize error: {e}"),
                location: path.display().to_string(),
            })
        })?;
        std::fs::write(path, content)?;

        info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Returns the selected profile.
    ///
    /// An explicitly named profile must exist; the active profile falls
    /// back to an empty one when the file does not define it yet.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named profile does not exist.
    pub fn profile(&self, name: Option<&str>) -> Result<Profile> {
        match name {
            Some(explicit) => self.profiles.get(explicit).cloned().ok_or_else(|| {
                RackforgeError::Config(ConfigError::UnknownProfile {
                    name: explicit.to_string(),
                })
            }),
            None => Ok(self
                .profiles
                .get(&self.active_profile)
                .cloned()
                .unwrap_or_default()),
        }
    }

    /// Returns a mutable handle to a named profile, creating it if needed.
    pub fn profile_mut(&mut self, name: &str) -> &mut Profile {
        self.profiles.entry(name.to_string()).or_default()
    }

    /// Resolves the API token: environment first, then the profile.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is configured anywhere.
    pub fn resolve_token(&self, name: Option<&str>) -> Result<String> {
        if let Ok(token) = std::env::var(ENV_API_TOKEN) {
            if !token.is_empty() {
                debug!("Using API token from {ENV_API_TOKEN}");
                return Ok(token);
            }
        }

        self.profile(name)?
            .token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| RackforgeError::Config(ConfigError::MissingToken))
    }

    /// Resolves the API endpoint: environment, then profile, then default.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named profile does not exist.
    pub fn resolve_endpoint(&self, name: Option<&str>) -> Result<String> {
        if let Ok(endpoint) = std::env::var(ENV_ENDPOINT) {
            if !endpoint.is_empty() {
                return Ok(endpoint);
            }
        }

        Ok(self
            .profile(name)?
            .endpoint
            .unwrap_or_else(|| String::from(DEFAULT_ENDPOINT)))
    }
}

/// Loads a `.env` file from the working directory when present.
///
/// # Errors
///
/// Returns an error if the `.env` file exists but cannot be loaded.
pub fn load_dotenv() -> Result<()> {
    let env_path = PathBuf::from(".env");

    if env_path.exists() {
        info!("Loading environment from: {}", env_path.display());
        dotenvy::from_path(&env_path).map_err(|e| {
            RackforgeError::Config(ConfigError::ParseError {
                message: format!("Failed to load .env file: {e}"),
                location: env_path.display().to_string(),
            })
        })?;
    } else {
        debug!(".env file not found");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(settings.active_profile, "default");
        assert!(settings.profiles.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.yaml");

        let mut settings = Settings::default();
        settings.profile_mut("staging").token = Some(String::from("tok-123"));
        settings.profile_mut("staging").endpoint =
            Some(String::from("https://staging.rackforge.io/v1"));
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_explicit_unknown_profile_is_an_error() {
        let settings = Settings::default();
        let err = settings.profile(Some("nope")).unwrap_err();
        assert!(err.to_string().contains("Unknown profile: nope"));
    }

    #[test]
    fn test_active_profile_falls_back_to_empty() {
        let settings = Settings::default();
        assert_eq!(settings.profile(None).unwrap(), Profile::default());
    }

    #[test]
    fn test_parse_settings_yaml() {
        let yaml = r"
active_profile: prod
profiles:
  prod:
    endpoint: https://api.rackforge.io/v1
    token: tok-prod
  staging:
    token: tok-staging
";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.active_profile, "prod");
        assert_eq!(settings.profiles.len(), 2);
        assert_eq!(
            settings.profile(Some("staging")).unwrap().token.as_deref(),
            Some("tok-staging")
        );
    }
}
