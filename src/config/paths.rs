//! Path management for ledgerlens
//!
//! ## Path Resolution Order
//!
//! 1. `LEDGERLENS_HOME` environment variable (if set)
//! 2. The platform config directory from `directories::ProjectDirs`
//!    (`~/.config/ledgerlens` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::LensError;

/// Environment variable that overrides the base directory
pub const HOME_ENV: &str = "LEDGERLENS_HOME";

/// Manages all paths used by ledgerlens
#[derive(Debug, Clone)]
pub struct LensPaths {
    /// Base directory for settings and exports
    base_dir: PathBuf,
}

impl LensPaths {
    /// Create a new LensPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, LensError> {
        let base_dir = match std::env::var(HOME_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create LensPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Default directory for exported dashboards
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Ensure the base and export directories exist
    pub fn ensure_directories(&self) -> Result<(), LensError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LensError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir())
            .map_err(|e| LensError::Io(format!("Failed to create export directory: {}", e)))?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, LensError> {
    ProjectDirs::from("", "", "ledgerlens")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| LensError::Config("Could not determine a home directory".into()))
}
