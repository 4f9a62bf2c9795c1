//! Error types for option analysis

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdgeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsolvable volatility: {0}")]
    UnsolvableVolatility(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

pub type EdgeResult<T> = Result<T, EdgeError>;

impl EdgeError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn unsolvable(msg: impl Into<String>) -> Self {
        Self::UnsolvableVolatility(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EdgeError::invalid_input("strike must be positive");
        assert_eq!(err.to_string(), "Invalid input: strike must be positive");

        let err = EdgeError::unsolvable("zero vega");
        assert!(matches!(err, EdgeError::UnsolvableVolatility(_)));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: EdgeError = io.into();
        assert!(err.to_string().starts_with("IO error"));
    }
}
