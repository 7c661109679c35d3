use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Probe error: {0}")]
    Probe(String),

    #[error("API injection failed: {0}")]
    Injection(String),

    #[error("Version lookup failed: {0}")]
    VersionLookup(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
