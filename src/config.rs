//! Configuration for mvnshelf.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (MVNSHELF_HOME, MVNSHELF_REGISTRY_URL, MVNSHELF_API_URL)
//! 2. Config file (.mvnshelf/config.yaml)
//! 3. Defaults (~/.mvnshelf, mvnrepository.com, search.maven.org)
//!
//! Config file discovery:
//! - Searches current directory and parents for .mvnshelf/config.yaml
//! - `paths.home` in the config file is relative to the .mvnshelf/ directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

const DEFAULT_WEB_URL: &str = "https://mvnrepository.com";
const DEFAULT_API_URL: &str = "https://search.maven.org";
const DEFAULT_TIMEOUT_SECONDS: u64 = 50;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub registry: Option<RegistryConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to the .mvnshelf/ directory)
    pub home: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    pub web_url: Option<String>,
    pub api_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to the state directory
    pub home: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Registry endpoints
    pub registry: RegistrySettings,
}

impl ResolvedConfig {
    /// Key-value storage file holding collections and preferences
    pub fn storage_path(&self) -> PathBuf {
        self.home.join("store.json")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySettings {
    /// Base URL of the registry website
    pub web_url: String,
    /// Base URL of the structured search API
    pub api_url: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            web_url: DEFAULT_WEB_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl RegistrySettings {
    /// Overlay config file values, then environment variables
    fn resolve(file: Option<&RegistryConfig>) -> Self {
        let defaults = Self::default();

        let web_url = std::env::var("MVNSHELF_REGISTRY_URL")
            .ok()
            .or_else(|| file.and_then(|r| r.web_url.clone()))
            .unwrap_or(defaults.web_url);
        let api_url = std::env::var("MVNSHELF_API_URL")
            .ok()
            .or_else(|| file.and_then(|r| r.api_url.clone()))
            .unwrap_or(defaults.api_url);
        let timeout_seconds = file
            .and_then(|r| r.timeout_seconds)
            .unwrap_or(defaults.timeout_seconds);

        Self {
            web_url,
            api_url,
            timeout_seconds,
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".mvnshelf").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".mvnshelf");

    let config_file = find_config_file();
    let file = config_file
        .as_deref()
        .map(load_config_file)
        .transpose()?;

    let home = if let Ok(env_home) = std::env::var("MVNSHELF_HOME") {
        PathBuf::from(env_home)
    } else if let (Some(path), Some(home)) = (
        config_file.as_deref(),
        file.as_ref().and_then(|f| f.paths.home.as_deref()),
    ) {
        let shelf_dir = path.parent().unwrap_or(Path::new("."));
        resolve_path(shelf_dir, home)
    } else {
        default_home
    };

    let registry = RegistrySettings::resolve(file.as_ref().and_then(|f| f.registry.as_ref()));

    Ok(ResolvedConfig {
        home,
        config_file,
        registry,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
