use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmrError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("dataframe error: {0}")]
    Frame(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, AmrError>;
