//! Configuration management
//!
//! Loads configuration from:
//! 1. A configuration file (staticpub.toml by default; TOML, JSON or YAML)
//! 2. Environment variables (STATICPUB__*, override)
//!
//! Optional fields fall back to the defaults below. Keys may be written in
//! snake_case or in the camelCase form used by ActivityPub documents.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Configuration file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "staticpub.toml";

/// Site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base origin of the site (e.g., "https://example.com")
    pub url: Option<String>,
    /// Account name used in the `acct:` URI
    pub username: Option<String>,
    /// Extra actor fields, merged over the generated defaults
    #[serde(default)]
    pub profile: Map<String, Value>,
    /// Actor document path relative to the site root (default: "i")
    #[serde(default = "default_profile_path", alias = "profilePath")]
    pub profile_path: String,
    /// Additional WebFinger links keyed by relation name
    #[serde(default, alias = "linkRelations")]
    pub link_relations: Map<String, Value>,
    /// Fragment identifying the actor's key (default: "main-key")
    #[serde(default = "default_public_key_id", alias = "publicKeyId")]
    pub public_key_id: String,
    /// PEM file published as the actor's public key
    #[serde(default = "default_public_key_path", alias = "publicKeyPath")]
    pub public_key_path: PathBuf,
    /// Directory holding WebFinger documents (default: "webfinger")
    #[serde(default = "default_webfinger_dir", alias = "webfingerDir")]
    pub webfinger_dir: String,
    /// Output directory (default: "dist")
    #[serde(default = "default_publish_dir", alias = "publishDir")]
    pub publish_dir: PathBuf,
    #[serde(default)]
    pub nodeinfo: NodeInfoConfig,
}

/// NodeInfo detail document options
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeInfoConfig {
    /// Software advertised in the detail document
    pub software: Option<NodeInfoSoftware>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeInfoSoftware {
    pub name: String,
    pub version: String,
}

fn default_profile_path() -> String {
    "i".to_string()
}

fn default_public_key_id() -> String {
    "main-key".to_string()
}

fn default_public_key_path() -> PathBuf {
    PathBuf::from("./public.pem")
}

fn default_webfinger_dir() -> String {
    "webfinger".to_string()
}

fn default_publish_dir() -> PathBuf {
    PathBuf::from("dist")
}

/// Validated account identity derived from `url` and `username`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// `url` without trailing slashes
    pub base_url: String,
    pub username: String,
    /// Host part of `url`, without port
    pub hostname: String,
}

impl SiteConfig {
    /// Load configuration from `path` and the environment
    ///
    /// # Errors
    /// Returns `ConfigNotFound` if the file does not exist and `Config`
    /// if it cannot be parsed or fails validation.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        // Load from environment variables (STATICPUB__*)
        Self::load_with_env(
            path,
            config::Environment::with_prefix("STATICPUB").separator("__"),
        )
    }

    /// Load configuration from `path`, overridden by `environment`
    ///
    /// The file is parsed with its own format crate so that profile fields
    /// and relation names keep their case. Only the environment layer goes
    /// through `config`, whose keys are always lowercase.
    pub fn load_with_env(path: &Path, environment: config::Environment) -> Result<Self, AppError> {
        if !path.is_file() {
            return Err(AppError::ConfigNotFound(path.to_path_buf()));
        }

        let mut settings = read_settings_file(path)?;

        let overrides: Value = config::Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        merge(&mut settings, overrides);

        let site_config: Self = serde_json::from_value(Value::Object(settings))
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        site_config.validate()?;
        Ok(site_config)
    }

    /// Check that the required fields are present and usable
    pub fn validate(&self) -> Result<(), AppError> {
        self.identity()?;

        if self.actor_path().is_empty() {
            return Err(AppError::Config("profile_path must not be empty".to_string()));
        }
        if self.webfinger_path().is_empty() {
            return Err(AppError::Config("webfinger_dir must not be empty".to_string()));
        }

        Ok(())
    }

    /// `profile_path` without leading or trailing slashes
    pub fn actor_path(&self) -> &str {
        self.profile_path.trim_matches('/')
    }

    /// `webfinger_dir` without leading or trailing slashes
    pub fn webfinger_path(&self) -> &str {
        self.webfinger_dir.trim_matches('/')
    }

    /// Resolve the account identity
    ///
    /// # Errors
    /// Fails if `url` or `username` is missing or empty, or if `url` is not
    /// an absolute URL with a host.
    pub fn identity(&self) -> Result<Identity, AppError> {
        let url = required(&self.url, "url")?;
        let username = required(&self.username, "username")?;

        let parsed = url::Url::parse(url)
            .map_err(|e| AppError::Config(format!("url is invalid: {e}")))?;
        let hostname = parsed
            .host_str()
            .ok_or_else(|| AppError::Config(format!("url has no hostname: {url}")))?;

        Ok(Identity {
            base_url: url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            hostname: hostname.to_string(),
        })
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    match value.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::Config(format!("{name} not set"))),
    }
}

/// Parse the configuration file, format chosen by extension.
///
/// Top-level keys are normalized to snake_case; nested keys are kept as
/// written.
fn read_settings_file(path: &Path) -> Result<Map<String, Value>, AppError> {
    let text = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    let invalid = |e: &dyn std::fmt::Display| AppError::Config(format!("{}: {e}", path.display()));

    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let document: Value = match extension.as_str() {
        "toml" => toml::from_str(&text).map_err(|e| invalid(&e))?,
        "json" => serde_json::from_str(&text).map_err(|e| invalid(&e))?,
        "yaml" | "yml" => serde_yaml::from_str(&text).map_err(|e| invalid(&e))?,
        _ => {
            return Err(AppError::Config(format!(
                "{}: unsupported configuration format",
                path.display()
            )));
        }
    };

    match document {
        Value::Object(settings) => Ok(settings
            .into_iter()
            .map(|(key, value)| (snake_case(&key), value))
            .collect()),
        Value::Null => Ok(Map::new()),
        _ => Err(AppError::Config(format!(
            "{}: expected a table at the top level",
            path.display()
        ))),
    }
}

fn snake_case(key: &str) -> String {
    let mut converted = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            converted.push('_');
            converted.push(c.to_ascii_lowercase());
        } else {
            converted.push(c);
        }
    }
    converted
}

/// Overlay `overrides` onto `settings`, descending into tables
fn merge(settings: &mut Map<String, Value>, overrides: Value) {
    let Value::Object(overrides) = overrides else {
        return;
    };
    for (key, value) in overrides {
        match settings.get_mut(&key) {
            Some(Value::Object(existing)) if value.is_object() => merge(existing, value),
            _ => {
                settings.insert(key, value);
            }
        }
    }
}
