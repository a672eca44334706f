// Error types for order operations
use thiserror::Error;

/// Errors that can occur while handling an order operation.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The database could not be opened or prepared.
    #[error("Failed to connect to the database: {0}")]
    Connection(String),

    /// User input could not be parsed or broke a field rule.
    #[error("{0}")]
    Validation(String),

    /// The referenced order does not exist.
    #[error("Food Order with the OrderID: {0} does not exist.")]
    NotFound(String),

    /// Any other database failure.
    #[error("{0}")]
    Database(#[from] rusqlite::Error),

    /// Reading from or writing to the console failed.
    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Standard input was closed while an answer was expected.
    #[error("Input closed")]
    InputClosed,
}

pub type OrderResult<T> = Result<T, OrderError>;
