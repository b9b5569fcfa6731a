use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request to {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("no element with id '{0}' in document")]
    RootNotFound(String),

    /// A structurally impossible node shape was encountered during
    /// traversal. Indicates a bug, but is still reported through the
    /// result value rather than panicking.
    #[error("invalid node shape: {0}")]
    InvalidNode(String),

    #[error("Other error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CrawlError>;
