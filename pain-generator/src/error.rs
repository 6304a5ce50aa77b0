use std::io;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PainError {
    #[error("I/O Error")]
    IoError(#[from] io::Error),
    #[error("XML tree error: {0}")]
    XmlError(#[from] xot::Error),
    #[error("XML parsing failed: {0}")]
    ParseError(String),
    #[error("File content cannot be empty or blank")]
    EmptyContent,
    #[error("Missing element <{0}>")]
    MissingElement(&'static str),
    #[error("{element} declares {declared} but the document holds {actual}")]
    CountMismatch {
        element: &'static str,
        declared: String,
        actual: usize,
    },
    #[error("{element} declares {declared} but the transactions sum to {actual}")]
    ControlSumMismatch {
        element: &'static str,
        declared: String,
        actual: Decimal,
    },
    #[error("Invalid amount {0:?}")]
    InvalidAmount(String),
    #[error("Transaction {index} carries {found:?}")]
    SequenceMismatch { index: usize, found: String },
}
