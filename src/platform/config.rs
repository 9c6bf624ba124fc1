// steplog - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::level::VerbosityLevel;
use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for steplog configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/steplog/ or %APPDATA%\steplog\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[output]` section.
    pub output: OutputSection,
    /// `[data]` section.
    pub data: DataSection,
    /// `[diagnostics]` section.
    pub diagnostics: DiagnosticsSection,
}

/// `[output]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Verbosity: 0-4 or silent/low/medium/high/highest. Kept as a raw
    /// value so a bad level becomes a warning, not a parse failure.
    pub level: Option<toml::Value>,
    /// Log file path (empty = stdout).
    pub file: Option<String>,
    /// Gutter width.
    pub label_width: Option<usize>,
    /// Total line width.
    pub line_width: Option<usize>,
}

/// `[data]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// Explicit data directory.
    pub directory: Option<String>,
}

/// `[diagnostics]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DiagnosticsSection {
    /// Tracing level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub level: VerbosityLevel,
    pub log_file: Option<PathBuf>,
    pub label_width: usize,
    pub line_width: usize,
    pub data_dir: Option<PathBuf>,
    /// Tracing filter for internal diagnostics.
    pub diagnostics_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            level: VerbosityLevel::default(),
            log_file: None,
            label_width: constants::DEFAULT_LABEL_WIDTH,
            line_width: constants::DEFAULT_LINE_WIDTH,
            data_dir: None,
            diagnostics_level: None,
        }
    }
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with a warning.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");
    let config = validate(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Check each field against named constants, accumulating all problems.
fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Output: level --
    if let Some(value) = raw.output.level {
        let parsed = match &value {
            toml::Value::Integer(i) => VerbosityLevel::from_value(*i),
            toml::Value::String(s) => VerbosityLevel::from_value(s.as_str()),
            other => Err(crate::util::error::LevelError::UnknownName {
                name: other.to_string(),
            }),
        };
        match parsed {
            Ok(level) => config.level = level,
            Err(e) => warnings.push(format!(
                "[output] level = {value}: {e}. Using default ({}).",
                config.level
            )),
        }
    }

    // -- Output: file --
    if let Some(file) = raw.output.file {
        if !file.is_empty() {
            config.log_file = Some(PathBuf::from(file));
        }
    }

    // -- Output: label_width --
    if let Some(width) = raw.output.label_width {
        if (constants::MIN_LABEL_WIDTH..=constants::MAX_LABEL_WIDTH).contains(&width) {
            config.label_width = width;
        } else {
            warnings.push(format!(
                "[output] label_width = {width} is out of range ({}-{}). Using default ({}).",
                constants::MIN_LABEL_WIDTH,
                constants::MAX_LABEL_WIDTH,
                constants::DEFAULT_LABEL_WIDTH,
            ));
        }
    }

    // -- Output: line_width --
    if let Some(width) = raw.output.line_width {
        if (constants::MIN_LINE_WIDTH..=constants::MAX_LINE_WIDTH).contains(&width)
            && width > config.label_width
        {
            config.line_width = width;
        } else {
            warnings.push(format!(
                "[output] line_width = {width} is out of range ({}-{}, and wider than the \
                 label gutter). Using default ({}).",
                constants::MIN_LINE_WIDTH,
                constants::MAX_LINE_WIDTH,
                constants::DEFAULT_LINE_WIDTH,
            ));
        }
    }

    // -- Data: directory --
    if let Some(dir) = raw.data.directory {
        if !dir.is_empty() {
            config.data_dir = Some(PathBuf::from(dir));
        }
    }

    // -- Diagnostics: level --
    if let Some(level) = raw.diagnostics.level {
        if constants::DIAGNOSTIC_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.diagnostics_level = Some(level);
        } else {
            warnings.push(format!(
                "[diagnostics] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    config
}
