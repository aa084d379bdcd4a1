//! Severity clustering of incident records.
//!
//! Incidents are summed per (year, month) into total harmed and total
//! property value, the two monthly series are paired into points, and
//! k-means groups the points into a fixed number of clusters.

pub mod aggregate;
pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod kmeans;
pub mod plot;
pub mod rng;
pub mod types;
