#[derive(Debug, thiserror::Error)]
pub enum BaseFlowError {
    #[error("failed to read base flow {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse base flow {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to encode launched request: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write launched request {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
