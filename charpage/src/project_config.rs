//! Project configuration from charpage.toml

use crate::document_model::ThemePreset;
use crate::html_exporter::{RenderOptions, ThemePolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory when no path is given
pub const CONFIG_FILE_NAME: &str = "charpage.toml";

/// Settings shared by every command, loaded from charpage.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Value of the `<html lang>` attribute in generated pages
    pub lang: String,

    /// Replace theme values outside the safe color grammar when rendering
    pub strict_theme: bool,

    /// Theme preset used by `init` for new documents
    pub default_preset: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            strict_theme: false,
            default_preset: ThemePreset::default().id().to_string(),
        }
    }
}

impl ProjectConfig {
    /// Read settings from a charpage.toml file
    ///
    /// Keys left out of the file keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ProjectConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ProjectConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ProjectConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, else charpage.toml from `dir` if it exists, else defaults
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self, ProjectConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let candidate = dir.join(CONFIG_FILE_NAME);
                if candidate.is_file() {
                    log::info!("Using configuration {}", candidate.display());
                    Self::load(candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Write these settings as a charpage.toml file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ProjectConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;

        fs::write(path, content).map_err(|source| ProjectConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The configured preset, falling back to the default for unknown ids
    pub fn preset(&self) -> ThemePreset {
        ThemePreset::from_id(&self.default_preset).unwrap_or_else(|| {
            log::warn!(
                "Unknown theme preset '{}' in configuration; using {}",
                self.default_preset,
                ThemePreset::default().id()
            );
            ThemePreset::default()
        })
    }

    /// Render options implied by this configuration
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            lang: self.lang.clone(),
            theme_policy: if self.strict_theme {
                ThemePolicy::Strict
            } else {
                ThemePolicy::Trusted
            },
        }
    }
}

/// Errors reading or writing charpage.toml
#[derive(Error, Debug)]
pub enum ProjectConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid settings in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
