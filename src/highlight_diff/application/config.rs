use super::error::ApplicationError;
use crate::domain::comparison::{ComparisonOptions, DEFAULT_OPACITY};
use crate::domain::ignore_region::IgnoreRegion;
use crate::infrastructure::file_storage::LocalFileStorage;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_DIFF_FOLDER: &str = "diff";

/// Settings for one comparison run, read from JSON and overridable from the CLI.
///
/// ```json
/// { "opacity": 0.85, "diff_folder": "diff", "ignore_regions": [[305, 98, 306, 99]] }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    pub opacity: f32,
    pub diff_folder: PathBuf,
    pub ignore_regions: Vec<IgnoreRegion>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            opacity: DEFAULT_OPACITY,
            diff_folder: PathBuf::from(DEFAULT_DIFF_FOLDER),
            ignore_regions: Vec::new(),
        }
    }
}

impl DiffConfig {
    pub fn from_json(json: &str) -> Result<Self, ApplicationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn load(storage: &LocalFileStorage, path: &Path) -> Result<Self, ApplicationError> {
        let data = storage.read_bytes(path).await?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// CLI values win over file values; ignore regions from both are kept.
    pub fn with_overrides(
        mut self,
        diff_folder: Option<PathBuf>,
        opacity: Option<f32>,
        extra_ignore_regions: Vec<IgnoreRegion>,
    ) -> Self {
        if let Some(diff_folder) = diff_folder {
            self.diff_folder = diff_folder;
        }
        if let Some(opacity) = opacity {
            self.opacity = opacity;
        }
        self.ignore_regions.extend(extra_ignore_regions);
        self
    }

    pub fn validate(&self) -> Result<(), ApplicationError> {
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(ApplicationError::ConfigurationError(format!(
                "opacity must be within [0, 1], got {}",
                self.opacity
            )));
        }
        if self.diff_folder.as_os_str().is_empty() {
            return Err(ApplicationError::ConfigurationError("diff_folder must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn comparison_options(&self) -> ComparisonOptions {
        ComparisonOptions::with_opacity(self.opacity)
    }
}
