use crate::{
    error::{AnalysisError, AnalysisResult},
    features::{FeatureWindow, YearRange},
    kmeans::KMeansParams,
    plot::PlotConfig,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything one analysis run needs. Any field missing from a JSON
/// config file falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub years:  YearRange,
    pub window: FeatureWindow,
    pub kmeans: KMeansParams,
    pub plot:   PlotConfig,
}

impl AnalysisConfig {
    /// Load a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> AnalysisResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        if self.years.start > self.years.end {
            return Err(AnalysisError::InvalidConfig(format!(
                "year range {}..={} is inverted",
                self.years.start, self.years.end
            )));
        }
        if self.window.capacity() == 0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "feature window [{}, {}) is empty",
                self.window.skip, self.window.end
            )));
        }
        self.kmeans.validate()
    }
}
