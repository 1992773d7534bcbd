use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metadata decoding error: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, GuardError>;
