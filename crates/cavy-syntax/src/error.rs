//! Error types for the lexer and parser.

use crate::token::Location;
use thiserror::Error;

/// A lexical error, recorded and recovered from rather than raised.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{location}: {message}")]
pub struct LexError {
    pub location: Location,
    pub message: String,
}

/// A syntax error, recorded and recovered from via statement synchronisation.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{location}: {message}")]
pub struct ParseError {
    pub location: Location,
    pub message: String,
}

impl ParseError {
    pub fn new(location: Location, message: impl Into<String>) -> Self {
        Self { location, message: message.into() }
    }
}
