//! K-means clustering of two-feature points.
//!
//! Fitting is delegated to `linfa-clustering` (k-means++ seeding, Lloyd
//! iterations, best of `n_init` runs); this module maps the analysis
//! config onto its hyper-parameters and the result back onto plain points.

use crate::{
    error::{AnalysisError, AnalysisResult},
    rng,
};
use linfa::{
    traits::{Fit, Predict},
    DatasetBase,
};
use linfa_clustering::KMeans as LinfaKMeans;
use linfa_nn::distance::L2Dist;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A feature vector: `[harmed, property_value]`.
pub type Point = [f64; 2];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansParams {
    pub n_clusters: usize,
    /// Independent runs; the lowest-inertia one wins.
    pub n_init:     usize,
    pub max_iter:   u64,
    /// Convergence threshold on centroid movement between iterations.
    pub tolerance:  f64,
    pub seed:       u64,
}

impl Default for KMeansParams {
    fn default() -> Self {
        Self {
            n_clusters: 3,
            n_init:     10,
            max_iter:   300,
            tolerance:  1e-4,
            seed:       42,
        }
    }
}

impl KMeansParams {
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.n_clusters == 0 {
            return Err(AnalysisError::InvalidConfig("n_clusters must be > 0".into()));
        }
        if self.n_init == 0 {
            return Err(AnalysisError::InvalidConfig("n_init must be > 0".into()));
        }
        if self.max_iter == 0 {
            return Err(AnalysisError::InvalidConfig("max_iter must be > 0".into()));
        }
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "tolerance must be > 0, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// A fitted model plus the labels of the points it was fitted on.
pub struct FittedKMeans {
    pub centroids: Vec<Point>,
    /// Cluster index per input point, in input order.
    pub labels:    Vec<usize>,
    /// Sum of squared distances from each point to its centroid.
    pub inertia:   f64,
    model:         LinfaKMeans<f64, L2Dist>,
}

impl fmt::Debug for FittedKMeans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FittedKMeans")
            .field("centroids", &self.centroids)
            .field("labels", &self.labels)
            .field("inertia", &self.inertia)
            .finish()
    }
}

impl PartialEq for FittedKMeans {
    fn eq(&self, other: &Self) -> bool {
        self.centroids == other.centroids
            && self.labels == other.labels
            && self.inertia == other.inertia
    }
}

impl FittedKMeans {
    /// Index of the nearest centroid.
    pub fn predict(&self, point: &Point) -> usize {
        let row = points_to_array(std::slice::from_ref(point));
        let labels: Array1<usize> = self.model.predict(&row);
        labels[0]
    }

    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &l in &self.labels {
            sizes[l] += 1;
        }
        sizes
    }
}

pub struct KMeans {
    params: KMeansParams,
}

impl KMeans {
    pub fn new(params: KMeansParams) -> Self {
        Self { params }
    }

    pub fn fit(&self, points: &[Point]) -> AnalysisResult<FittedKMeans> {
        self.params.validate()?;
        let k = self.params.n_clusters;
        if points.len() < k {
            return Err(AnalysisError::TooFewPoints {
                points: points.len(),
                clusters: k,
            });
        }

        let records = points_to_array(points);
        let dataset = DatasetBase::from(records.clone());
        let model = LinfaKMeans::params_with_rng(k, rng::seeded(self.params.seed, rng::KMEANS_STREAM))
            .n_runs(self.params.n_init)
            .max_n_iterations(self.params.max_iter)
            .tolerance(self.params.tolerance)
            .fit(&dataset)?;

        let labels: Array1<usize> = model.predict(&records);
        let centroids: Vec<Point> = model
            .centroids()
            .outer_iter()
            .map(|row| [row[0], row[1]])
            .collect();
        let inertia = points
            .iter()
            .zip(labels.iter())
            .map(|(p, &l)| {
                let c = centroids[l];
                (p[0] - c[0]).powi(2) + (p[1] - c[1]).powi(2)
            })
            .sum();

        log::info!(
            "Fitted {k} clusters over {} points ({} runs): inertia={:.4}",
            points.len(),
            self.params.n_init,
            inertia
        );
        Ok(FittedKMeans {
            centroids,
            labels: labels.to_vec(),
            inertia,
            model,
        })
    }
}

/// One row per point, one column per feature.
pub fn points_to_array(points: &[Point]) -> Array2<f64> {
    Array2::from_shape_fn((points.len(), 2), |(i, j)| points[i][j])
}
