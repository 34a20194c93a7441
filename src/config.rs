//! Input configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Keyboard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Whether keyboard input starts out blocked
    pub block_keys: bool,
    /// Whether the terminal adapter folds a-z to the A-Z key codes
    pub uppercase_letters: bool,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            block_keys: false,
            uppercase_letters: true,
        }
    }
}

/// Cursor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Whether the cursor is visible after initialization
    pub visible: bool,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self { visible: true }
    }
}

/// Input configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    pub keyboard: KeyboardConfig,
    pub cursor: CursorConfig,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            profile: "release".to_string(),
            keyboard: KeyboardConfig::default(),
            cursor: CursorConfig::default(),
        }
    }
}

impl InputConfig {
    /// Loads configuration for the given profile
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. config/{profile}.toml
    /// 2. Environment variables with prefix INPUT_ (e.g., INPUT_CURSOR__VISIBLE=false)
    ///
    /// Config files are searched for next to the executable, then in ./config.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(dir) = Self::find_config_dir() {
            let profile_path = dir.join(profile);
            builder = builder.add_source(File::from(profile_path.as_path()).required(false));
        } else {
            builder =
                builder.add_source(File::with_name(&format!("config/{}", profile)).required(false));
        }

        // Use __ as separator for nested fields (e.g., INPUT_KEYBOARD__BLOCK_KEYS)
        builder = builder.add_source(
            Environment::with_prefix("INPUT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.set_override("profile", profile)?.build()?;

        config.try_deserialize()
    }

    fn find_config_dir() -> Option<std::path::PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = std::path::PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads configuration using the INPUT_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("INPUT_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }
}
