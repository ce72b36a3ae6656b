//! Token sources for the inference walker.
//!
//! Text is parsed by `serde_json`; [`DocumentTokens`] replays the parsed document as a
//! token stream so inference never sees `serde_json`'s own number or map types.

use std::borrow::Cow;
use std::fmt;
use std::slice;

use serde_json::Value as JsonValue;
use serde_json::error::Category;

use crate::error::DecodeError;
use crate::options::Options;

#[derive(Debug, Clone, PartialEq)]
pub enum Token<'de> {
    Null,
    Bool(bool),
    /// Lexical text of a grammar-valid number, unclassified
    Number(&'de str),
    String(Cow<'de, str>),
    BeginArray,
    EndArray,
    BeginObject,
    EndObject,
    PropertyName(Cow<'de, str>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Null,
    Bool,
    Number,
    String,
    BeginArray,
    EndArray,
    BeginObject,
    EndObject,
    PropertyName,
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Null => "null",
            TokenKind::Bool => "boolean",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::BeginArray => "start of array",
            TokenKind::EndArray => "end of array",
            TokenKind::BeginObject => "start of object",
            TokenKind::EndObject => "end of object",
            TokenKind::PropertyName => "property name",
            TokenKind::EndOfInput => "end of input",
        })
    }
}

impl Token<'_> {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Null => TokenKind::Null,
            Token::Bool(_) => TokenKind::Bool,
            Token::Number(_) => TokenKind::Number,
            Token::String(_) => TokenKind::String,
            Token::BeginArray => TokenKind::BeginArray,
            Token::EndArray => TokenKind::EndArray,
            Token::BeginObject => TokenKind::BeginObject,
            Token::EndObject => TokenKind::EndObject,
            Token::PropertyName(_) => TokenKind::PropertyName,
        }
    }
}

/// Source of JSON tokens in document order.
pub trait TokenReader<'de> {
    /// Next token, or `None` once the document (or an empty input) is exhausted.
    fn next_token(&mut self) -> Result<Option<Token<'de>>, DecodeError>;

    /// Position of the most recently returned token. Implementations over raw text use
    /// byte offsets, [`DocumentTokens`] uses the token index.
    fn offset(&self) -> usize;
}

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse `input` into a document. Empty or all-whitespace input yields `None`.
pub fn parse(input: &[u8], options: &Options) -> Result<Option<JsonValue>, DecodeError> {
    let (base, text) = match input.strip_prefix(BOM) {
        Some(rest) => (BOM.len(), rest),
        None => (0, input),
    };
    if text.iter().all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r')) {
        return Ok(None);
    }
    serde_json::from_slice(text)
        .map(Some)
        .map_err(|err| syntax_error(err, text, base, options.max_depth))
}

fn syntax_error(err: serde_json::Error, text: &[u8], base: usize, max_depth: usize) -> DecodeError {
    let offset = base + byte_offset(text, err.line(), err.column());
    match err.classify() {
        Category::Io => DecodeError::Io(err.into()),
        Category::Eof => DecodeError::UnexpectedEof { offset },
        Category::Syntax | Category::Data => {
            let message = err.to_string();
            let reason = message
                .rsplit_once(" at line ")
                .map_or(message.as_str(), |(reason, _)| reason);
            match reason {
                "trailing characters" => DecodeError::TrailingCharacters { offset },
                "invalid unicode code point" => DecodeError::InvalidUtf8 { offset },
                "recursion limit exceeded" => DecodeError::DepthLimitExceeded { offset, max_depth },
                r if r.starts_with("control character") => DecodeError::ControlCharacter { offset },
                r if r.contains("escape") => DecodeError::InvalidEscape { offset },
                r => DecodeError::UnexpectedCharacter {
                    offset,
                    reason: r.to_string(),
                },
            }
        }
    }
}

/// Byte offset of a 1-based line and column as reported by `serde_json`. The column
/// counts bytes up to and including the offending one.
fn byte_offset(text: &[u8], line: usize, column: usize) -> usize {
    let line_start = match line {
        0 | 1 => 0,
        n => text
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b == b'\n')
            .nth(n - 2)
            .map_or(text.len(), |(i, _)| i + 1),
    };
    (line_start + column.saturating_sub(1)).min(text.len())
}

enum Frame<'a> {
    Array(slice::Iter<'a, JsonValue>),
    Object(serde_json::map::Iter<'a>),
}

/// [`TokenReader`] over a parsed document. Strings and number literals borrow from it.
pub struct DocumentTokens<'a> {
    root: Option<&'a JsonValue>,
    frames: Vec<Frame<'a>>,
    /// Member value waiting behind the property name just returned
    pending: Option<&'a JsonValue>,
    emitted: usize,
}

impl<'a> DocumentTokens<'a> {
    pub fn new(root: Option<&'a JsonValue>) -> Self {
        Self {
            root,
            frames: Vec::new(),
            pending: None,
            emitted: 0,
        }
    }

    fn open(&mut self, value: &'a JsonValue) -> Token<'a> {
        match value {
            JsonValue::Null => Token::Null,
            JsonValue::Bool(b) => Token::Bool(*b),
            JsonValue::Number(n) => Token::Number(n.as_str()),
            JsonValue::String(s) => Token::String(Cow::Borrowed(s.as_str())),
            JsonValue::Array(items) => {
                self.frames.push(Frame::Array(items.iter()));
                Token::BeginArray
            }
            JsonValue::Object(members) => {
                self.frames.push(Frame::Object(members.iter()));
                Token::BeginObject
            }
        }
    }
}

impl<'a> TokenReader<'a> for DocumentTokens<'a> {
    fn next_token(&mut self) -> Result<Option<Token<'a>>, DecodeError> {
        let token = if let Some(value) = self.pending.take() {
            self.open(value)
        } else {
            match self.frames.last_mut() {
                None => match self.root.take() {
                    Some(value) => self.open(value),
                    None => return Ok(None),
                },
                Some(Frame::Array(items)) => match items.next() {
                    Some(value) => self.open(value),
                    None => {
                        self.frames.pop();
                        Token::EndArray
                    }
                },
                Some(Frame::Object(members)) => match members.next() {
                    Some((name, value)) => {
                        self.pending = Some(value);
                        Token::PropertyName(Cow::Borrowed(name.as_str()))
                    }
                    None => {
                        self.frames.pop();
                        Token::EndObject
                    }
                },
            }
        };
        self.emitted += 1;
        Ok(Some(token))
    }

    fn offset(&self) -> usize {
        self.emitted.saturating_sub(1)
    }
}
