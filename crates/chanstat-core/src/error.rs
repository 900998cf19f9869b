use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to write run log: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing task parameter: {0}")]
    MissingParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
