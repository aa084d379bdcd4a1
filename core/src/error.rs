use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Clustering error: {0}")]
    Clustering(#[from] linfa_clustering::KMeansError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Column '{column}' not found in header")]
    MissingColumn { column: String },

    #[error("Invalid value '{value}' in column '{column}' at line {line}")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },

    #[error("Feature columns differ in length: harmed={harmed}, property_value={property_value}")]
    FeatureLengthMismatch { harmed: usize, property_value: usize },

    #[error("No months with positive totals inside the feature window")]
    EmptyFeatureTable,

    #[error("Cannot form {clusters} clusters from {points} points")]
    TooFewPoints { points: usize, clusters: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Plot rendering failed: {0}")]
    Plot(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
