//! Configuration file management for vidplan.
//!
//! Provides a TOML-based config file at `~/.config/vidplan/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use vidplan_core::brief::{BriefInput, DurationBucket, Tone};

use crate::OutputFormat;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub defaults: DefaultsSection,
}

/// Brief defaults applied beneath every brief file and flag.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_persona: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

impl ConfigFile {
    /// A config populated with the built-in defaults, for `vidplan init`.
    pub fn starter() -> Self {
        let sample = BriefInput::default();
        Self {
            defaults: DefaultsSection {
                target_persona: Some(sample.target_persona),
                tone: Some(Tone::Informative.to_string()),
                duration: Some(DurationBucket::Standard.seconds()),
                call_to_action: Some(sample.call_to_action),
                format: Some(OutputFormat::Text),
            },
        }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the vidplan config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/vidplan` or `~/.config/vidplan`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("vidplan");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("vidplan")
}

/// Return the path to the vidplan config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug, Clone, PartialEq)]
pub struct VidplanConfig {
    pub tone: String,
    pub duration: String,
    pub target_persona: Option<String>,
    pub call_to_action: Option<String>,
    pub format: OutputFormat,
}

impl VidplanConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Format: `cli_format` > `VIDPLAN_FORMAT` env > `defaults.format` > text
    /// - Tone: `VIDPLAN_TONE` env > `defaults.tone` > informative
    /// - Duration: `VIDPLAN_DURATION` env > `defaults.duration` > 60
    /// - Persona and call-to-action: `defaults.*` only
    ///
    /// Tone and duration flags are applied later, on top of the brief file.
    /// A missing config file is not an error; a malformed one is skipped
    /// with a warning.
    pub fn resolve(cli_format: Option<OutputFormat>) -> Result<Self> {
        let path = config_path();
        let file_config = if path.exists() {
            match load_config() {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %format!("{e:#}"), "ignoring unreadable config file");
                    ConfigFile::default()
                }
            }
        } else {
            ConfigFile::default()
        };
        Self::resolve_with(file_config, cli_format)
    }

    /// Resolve against an already-loaded config file.
    pub fn resolve_with(file_config: ConfigFile, cli_format: Option<OutputFormat>) -> Result<Self> {
        let defaults = file_config.defaults;

        let format = if let Some(format) = cli_format {
            format
        } else if let Ok(raw) = std::env::var("VIDPLAN_FORMAT") {
            raw.parse()
                .with_context(|| format!("VIDPLAN_FORMAT env var is invalid: {raw:?}"))?
        } else {
            defaults.format.unwrap_or_default()
        };

        let tone = if let Ok(tone) = std::env::var("VIDPLAN_TONE") {
            tone
        } else if let Some(tone) = defaults.tone {
            tone
        } else {
            Tone::Informative.to_string()
        };

        let duration = if let Ok(duration) = std::env::var("VIDPLAN_DURATION") {
            duration
        } else if let Some(seconds) = defaults.duration {
            seconds.to_string()
        } else {
            DurationBucket::Standard.to_string()
        };

        tracing::debug!(%tone, %duration, ?format, "resolved config");

        Ok(Self {
            tone,
            duration,
            target_persona: defaults.target_persona,
            call_to_action: defaults.call_to_action,
            format,
        })
    }

    /// The base brief every other source is layered on.
    pub fn base_input(&self) -> BriefInput {
        BriefInput {
            target_persona: self.target_persona.clone().unwrap_or_default(),
            tone: self.tone.clone(),
            duration: self.duration.clone(),
            call_to_action: self.call_to_action.clone().unwrap_or_default(),
            ..BriefInput::blank()
        }
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
