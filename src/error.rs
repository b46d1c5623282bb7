use thiserror::Error;

pub type Result<T> = std::result::Result<T, TimeLogError>;

#[derive(Debug, Error)]
pub enum TimeLogError {
    /// Bad caller input: empty required field, malformed HH:MM time,
    /// checkout not after checkin. Aborts the operation with no writes.
    #[error("{0}")]
    Validation(String),

    #[error("no user found for ledger key '{0}'")]
    UserNotFound(String),

    /// The two-digit ledger key suffix for this name pair is used up.
    #[error("no ledger key left for {first} {last}: suffix space exhausted")]
    LedgerKeyExhausted { first: String, last: String },

    #[error(transparent)]
    Storage(#[from] sqlx::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
