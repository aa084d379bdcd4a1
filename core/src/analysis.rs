//! The analysis pipeline: incident table -> monthly features -> clusters.

use crate::{
    config::AnalysisConfig,
    dataset::IncidentTable,
    error::AnalysisResult,
    features::{build_feature_table, FeatureTable},
    kmeans::{KMeans, Point},
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ClusterReport {
    pub n_points:      usize,
    pub centroids:     Vec<Point>,
    pub labels:        Vec<usize>,
    pub inertia:       f64,
    pub cluster_sizes: Vec<usize>,
    pub features:      FeatureTable,
}

impl ClusterReport {
    pub fn points(&self) -> Vec<Point> {
        self.features.points()
    }
}

pub fn run_analysis(table: &IncidentTable, config: &AnalysisConfig) -> AnalysisResult<ClusterReport> {
    config.validate()?;
    let features = build_feature_table(table, config.years, config.window)?;
    let points = features.points();
    log::info!("Clustering {} feature rows", points.len());

    let fitted = KMeans::new(config.kmeans.clone()).fit(&points)?;
    let cluster_sizes = fitted.cluster_sizes();

    Ok(ClusterReport {
        n_points: points.len(),
        centroids: fitted.centroids,
        labels: fitted.labels,
        inertia: fitted.inertia,
        cluster_sizes,
        features,
    })
}

/// Centroids as a bracketed array, one row per line:
///
/// ```text
/// [[12.0000 3400.0000]
///  [80.5000 125000.0000]]
/// ```
pub fn format_centroids(centroids: &[Point]) -> String {
    let rows: Vec<String> = centroids
        .iter()
        .map(|c| format!("[{:.4} {:.4}]", c[0], c[1]))
        .collect();
    format!("[{}]", rows.join("\n "))
}
