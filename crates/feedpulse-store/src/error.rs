use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed snapshot history at {path}: {source}")]
    HistoryParse {
        path: String,
        source: serde_json::Error,
    },

    #[error("article already collected at {path}")]
    ArticleExists { path: String },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
