#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("failed to decode catalog response from {url}: {message}")]
    Decode { url: String, message: String },
    #[error("failed to read catalog file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog file {path}: {source}")]
    ParseFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
