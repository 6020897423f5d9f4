//! Configuration loader for the module documentation file
//!
//! Loading never fails because of the file's content. A missing or malformed
//! file is replaced by the bundled example, which is written back to the
//! same path before the run continues.

use crate::config::defaults::example_config;
use crate::config::types::ProjectConfig;
use crate::errors::{ReleaseNotesError, Result};
use std::fs;
use std::path::Path;

/// Where the configuration used for a run came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File,
    Bootstrapped { reason: String },
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ProjectConfig,
    pub origin: ConfigOrigin,
}

/// Configuration loader with example bootstrap
pub struct ConfigLoader;
impl ConfigLoader {
    /// Load configuration from a YAML string
    ///
    /// A document without any content is rejected, since it would otherwise
    /// yield a report without modules.
    pub fn from_str(content: &str) -> Result<ProjectConfig> {
        if is_blank_document(content) {
            return Err(ReleaseNotesError::ConfigParse(
                "Configuration file is empty".to_string(),
            ));
        }
        serde_yaml::from_str(content).map_err(|e| {
            ReleaseNotesError::ConfigParse(format!("Failed to parse YAML config: {}", e))
        })
    }

    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ProjectConfig> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|e| ReleaseNotesError::ConfigIo {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_str(&content)
    }

    /// Serialize a configuration to `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(config: &ProjectConfig, path: P) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(config).map_err(|e| {
            ReleaseNotesError::ConfigParse(format!("Failed to serialize config: {}", e))
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ReleaseNotesError::ConfigIo {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        fs::write(path, yaml).map_err(|e| ReleaseNotesError::ConfigIo {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load `path`, or write the example configuration there and use it.
    ///
    /// Only a failure to write the example is reported as an error.
    pub fn load_or_bootstrap<P: AsRef<Path>>(path: P) -> Result<LoadedConfig> {
        let path = path.as_ref();

        let reason = if !path.exists() {
            log::warn!("File not found: '{}'", path.display());
            format!("File not found: '{}'", path.display())
        } else {
            match Self::from_file(path) {
                Ok(config) => {
                    log::info!(
                        "Loaded module documentation for project '{}' ({} modules) from {}",
                        config.project,
                        config.modules.len(),
                        path.display()
                    );
                    return Ok(LoadedConfig {
                        config,
                        origin: ConfigOrigin::File,
                    });
                }
                Err(e) => {
                    log::error!("{}", e);
                    e.to_string()
                }
            }
        };

        let config = example_config()?;
        Self::save(&config, path)?;
        log::info!("Example module documentation written to {}", path.display());

        Ok(LoadedConfig {
            config,
            origin: ConfigOrigin::Bootstrapped { reason },
        })
    }
}

/// Only whitespace, comments and document markers.
fn is_blank_document(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}
