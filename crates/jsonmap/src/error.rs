use thiserror::Error;

use std::io;

use crate::decode::reader::TokenKind;

/// Failure while turning a token stream into a [`Value`](crate::Value).
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("{reason} at offset {offset}")]
    UnexpectedCharacter { offset: usize, reason: String },

    #[error("expected {expected}, found {found} at offset {offset}")]
    TokenMismatch {
        offset: usize,
        expected: &'static str,
        found: TokenKind,
    },

    #[error("number `{literal}` at offset {offset} is outside the supported range")]
    NumberOutOfRange { offset: usize, literal: String },

    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape { offset: usize },

    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("unescaped control character in string at offset {offset}")]
    ControlCharacter { offset: usize },

    #[error("maximum nesting depth of {max_depth} exceeded at offset {offset}")]
    DepthLimitExceeded { offset: usize, max_depth: usize },

    #[error("trailing characters after document at offset {offset}")]
    TrailingCharacters { offset: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl DecodeError {
    /// Where the failure happened: a byte offset for malformed text, the token index for
    /// failures found while inferring types from well-formed text.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::UnexpectedEof { offset }
            | DecodeError::UnexpectedCharacter { offset, .. }
            | DecodeError::TokenMismatch { offset, .. }
            | DecodeError::NumberOutOfRange { offset, .. }
            | DecodeError::InvalidEscape { offset }
            | DecodeError::InvalidUtf8 { offset }
            | DecodeError::ControlCharacter { offset }
            | DecodeError::DepthLimitExceeded { offset, .. }
            | DecodeError::TrailingCharacters { offset } => Some(*offset),
            DecodeError::Io(_) => None,
        }
    }
}

/// Failure while writing a value as JSON text.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("cannot represent {kind} as JSON")]
    Unrepresentable { kind: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Custom(String),
}

impl serde::ser::Error for EncodeError {
    fn custom<T: core::fmt::Display>(msg: T) -> Self {
        EncodeError::Custom(msg.to_string())
    }
}

/// Caller wired a component to something it cannot handle.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("the '{binder}' binder should only be used on Mapping, it will not work on '{shape}'")]
    UnsupportedShape {
        binder: &'static str,
        shape: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

pub type Result<T> = core::result::Result<T, Error>;
