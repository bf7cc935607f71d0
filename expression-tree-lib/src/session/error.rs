use crate::interpreter::error::{EvaluationError, ParseError};
use crate::interpreter::Notation;
use std::string::FromUtf8Error;
use thiserror::Error;

/// An operation was requested in a state that does not allow it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Cannot {operation} before a format has been chosen")]
    FormatRequired { operation: &'static str },
    #[error("Cannot {operation} before an expression has been built")]
    TreeRequired { operation: &'static str },
}

/// A `key=value` assignment could not be understood.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("Must have = sign present: {0:?}")]
    MissingOperator(String),
    #[error("Must be in the form key=value: {0:?}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Assignment(#[from] AssignmentError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error("Unknown format {0:?}, expected one of in-order, pre-order, post-order, level-order")]
    UnknownNotation(String),
    #[error("Expressions cannot be read in {0} format")]
    UnsupportedNotation(Notation),
    #[error("Failed to build token string")]
    Render(#[from] FromUtf8Error),
}
