//! Configuration loading and resolution
//!
//! Settings priority (highest first):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Built-in defaults (code constants)
//!
//! A missing TOML file is not fatal: a warning is logged and defaults are used.
//! A TOML file that exists but cannot be parsed is a configuration error.

use crate::layout::OutputLayout;
use crate::rules::RuleTables;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "EXAM_SORTER_CONFIG";

/// Environment variable holding the language-model API key
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// On-disk configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Folder holding the unsorted scans
    #[serde(default)]
    pub source_root: Option<PathBuf>,

    /// Root of the classified archive
    #[serde(default)]
    pub destination_root: Option<PathBuf>,

    /// JSON course catalog (degree → course names)
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Pause between type normalization and the text/AI calls
    #[serde(default)]
    pub pacing_delay_ms: Option<u64>,

    /// Lines of leading text handed to the keyword scan and the extractor
    #[serde(default)]
    pub text_line_limit: Option<usize>,

    #[serde(default)]
    pub thresholds: Thresholds,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub rules: RuleTables,

    #[serde(default)]
    pub layout: OutputLayout,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Matching and validation thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Minimum score (0-100) to adopt a catalog course name
    pub course_cutoff: u8,
    /// Minimum score (0-100) to reuse an existing course folder
    pub folder_cutoff: u8,
    /// Earliest accepted exam year
    pub min_year: i32,
    /// Latest accepted exam year
    pub max_year: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            course_cutoff: 70,
            folder_cutoff: 85,
            min_year: 2000,
            max_year: 2025,
        }
    }
}

/// OpenAI-compatible chat completion endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_base: String,
    pub model: String,
    /// Prefer the `OPENAI_API_KEY` environment variable over storing it here
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key: None,
            temperature: 0.0,
            max_tokens: 300,
            timeout_secs: 60,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const DEFAULT_PACING_DELAY_MS: u64 = 1500;
const DEFAULT_TEXT_LINE_LIMIT: usize = 60;

/// Locate the config file: explicit path → `EXAM_SORTER_CONFIG` → user config dir
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir().map(|d| d.join("exam-sorter").join("config.toml"))
}

/// Load the TOML config, falling back to defaults when the file is absent
pub fn load_toml_config(path: Option<&Path>) -> Result<TomlConfig> {
    let Some(path) = path else {
        warn!("No configuration file location available, using defaults");
        return Ok(TomlConfig::default());
    };

    if !path.exists() {
        warn!(
            "Configuration file not found at {}, using defaults",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;

    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Resolve the language-model API key
///
/// **Priority:** ENV → TOML
pub fn resolve_api_key(toml_config: &TomlConfig) -> Option<String> {
    let env_key = std::env::var(API_KEY_ENV_VAR)
        .ok()
        .filter(|k| is_valid_key(k));
    let toml_key = toml_config.llm.api_key.clone().filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!("API key found in both environment and TOML. Using environment variable.");
    }

    env_key.or(toml_key)
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Values supplied on the command line or through environment variables
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source_root: Option<PathBuf>,
    pub destination_root: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub pacing_delay_ms: Option<u64>,
}

/// Fully resolved settings handed to the classifier at construction
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub catalog_path: PathBuf,
    pub pacing_delay: Duration,
    pub text_line_limit: usize,
    pub thresholds: Thresholds,
    pub rules: RuleTables,
    pub layout: OutputLayout,
}

impl ClassifierConfig {
    /// Merge overrides over the TOML file; fails if a required path is missing
    pub fn resolve(toml_config: &TomlConfig, overrides: &Overrides) -> Result<Self> {
        let source_root = required(
            overrides.source_root.as_ref(),
            toml_config.source_root.as_ref(),
            "source_root",
        )?;
        let destination_root = required(
            overrides.destination_root.as_ref(),
            toml_config.destination_root.as_ref(),
            "destination_root",
        )?;
        let catalog_path = required(
            overrides.catalog_path.as_ref(),
            toml_config.catalog_path.as_ref(),
            "catalog_path",
        )?;

        let pacing_ms = overrides
            .pacing_delay_ms
            .or(toml_config.pacing_delay_ms)
            .unwrap_or(DEFAULT_PACING_DELAY_MS);

        Ok(Self {
            source_root,
            destination_root,
            catalog_path,
            pacing_delay: Duration::from_millis(pacing_ms),
            text_line_limit: toml_config.text_line_limit.unwrap_or(DEFAULT_TEXT_LINE_LIMIT),
            thresholds: toml_config.thresholds,
            rules: toml_config.rules.clone(),
            layout: toml_config.layout.clone(),
        })
    }

    /// Single startup validation step
    pub fn validate(&self) -> Result<()> {
        if !self.source_root.is_dir() {
            return Err(Error::Config(format!(
                "source_root is not a directory: {}",
                self.source_root.display()
            )));
        }

        if !self.catalog_path.is_file() {
            return Err(Error::Config(format!(
                "catalog_path does not exist: {}",
                self.catalog_path.display()
            )));
        }

        if same_directory(&self.source_root, &self.destination_root) {
            return Err(Error::Config(format!(
                "destination_root must differ from source_root: {}",
                self.destination_root.display()
            )));
        }

        if self.destination_root.exists() && !self.destination_root.is_dir() {
            return Err(Error::Config(format!(
                "destination_root exists but is not a directory: {}",
                self.destination_root.display()
            )));
        }

        let t = &self.thresholds;
        if t.course_cutoff > 100 || t.folder_cutoff > 100 {
            return Err(Error::Config(
                "thresholds.course_cutoff and thresholds.folder_cutoff must be 0-100".to_string(),
            ));
        }
        if t.min_year > t.max_year {
            return Err(Error::Config(format!(
                "thresholds.min_year ({}) is after thresholds.max_year ({})",
                t.min_year, t.max_year
            )));
        }

        if self.text_line_limit == 0 {
            return Err(Error::Config("text_line_limit must be at least 1".to_string()));
        }

        self.rules.validate()
    }
}

/// Same directory after resolving links, or the same spelling if either is missing
fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn required(cli: Option<&PathBuf>, toml: Option<&PathBuf>, key: &str) -> Result<PathBuf> {
    cli.or(toml).cloned().ok_or_else(|| {
        Error::Config(format!(
            "{} not configured. Pass it on the command line, set the environment variable, \
             or add `{} = \"...\"` to the config file",
            key, key
        ))
    })
}
