use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid Maestro server URL '{url}': {source}")]
    InvalidServer {
        url: String,
        source: url::ParseError,
    },

    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn request(endpoint: &str, source: reqwest::Error) -> Self {
        Error::Request {
            endpoint: endpoint.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
