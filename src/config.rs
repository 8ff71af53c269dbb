//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/prefgen/config.toml` (XDG) or platform config dir
//! 2. Project config: `prefgen.toml`
//! 3. Environment variables: `PREFGEN_*`, nested keys separated by `__`
//!    (e.g. `PREFGEN_OUTPUT__DIR=build/generated`)
//!
//! Every key has a default, so an empty configuration is valid:
//!
//! ```toml
//! [input]
//! dir = "prefs"
//! extension = "prefs"
//!
//! [output]
//! dir = "generated"
//!
//! [java]
//! javadoc = "Generated by PreferenceRoom. (https://github.com/skydoves/PreferenceRoom)."
//! non_null_annotation = "android.support.annotation.NonNull"
//! indent = "  "
//! ```

use std::ops::Deref;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "prefgen.toml";

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub java: JavaConfig,
}

/// Where declaration files are read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Directory scanned recursively for declaration files.
    #[serde(default = "default_input_dir")]
    pub dir: PathBuf,
    /// Extension of declaration files, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: default_input_dir(),
            extension: default_extension(),
        }
    }
}

/// Where generated sources are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

/// Java source rendering options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JavaConfig {
    /// Class-level Javadoc of every generated injector.
    #[serde(default = "default_javadoc")]
    pub javadoc: String,
    /// Annotation type placed on the constructor parameter.
    /// An empty string disables the annotation.
    #[serde(default = "default_non_null_annotation")]
    pub non_null_annotation: String,
    /// One indentation level.
    #[serde(default = "default_indent")]
    pub indent: String,
}

impl Default for JavaConfig {
    fn default() -> Self {
        Self {
            javadoc: default_javadoc(),
            non_null_annotation: default_non_null_annotation(),
            indent: default_indent(),
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("prefs")
}

fn default_extension() -> String {
    "prefs".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

fn default_javadoc() -> String {
    "Generated by PreferenceRoom. (https://github.com/skydoves/PreferenceRoom).".to_string()
}

fn default_non_null_annotation() -> String {
    "android.support.annotation.NonNull".to_string()
}

fn default_indent() -> String {
    "  ".to_string()
}

impl Config {
    /// Load config with layered resolution (defaults → user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::user_config_path(), Path::new(PROJECT_CONFIG_FILE))
    }

    /// Load config from explicit user and project files. Missing files are
    /// skipped.
    pub fn load_from(user_config: &Path, project_config: &Path) -> Result<Self, ConfigError> {
        Figment::from(Serialized::defaults(Config::default()))
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(user_config))
            // Layer 2: Project config
            .merge(Toml::file(project_config))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed("PREFGEN_").split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// User config path: ~/.config/prefgen/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("prefgen").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("prefgen").join("config.toml"))
            .unwrap_or_default()
    }
}
