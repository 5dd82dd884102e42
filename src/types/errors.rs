use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Platform id absent from the registry. A caller/config defect, not a
    /// missing-artwork condition.
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),
    /// Listing fetch or completion call failed at the HTTP level.
    #[error("Transport error: {0}")]
    Transport(String),
    /// Listing page could not be interpreted.
    #[error("Malformed listing: {0}")]
    Listing(String),
}

impl From<reqwest::Error> for ScrapeError {
    fn from(error: reqwest::Error) -> Self {
        ScrapeError::Transport(error.to_string())
    }
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;
