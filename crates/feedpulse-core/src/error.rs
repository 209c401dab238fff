use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read labels file {path}: {source}")]
    LabelsFileIo {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse labels file: {0}")]
    LabelsFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
