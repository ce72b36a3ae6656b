//! Type-inferring walker from tokens to [`Value`]s.

use crate::decode::reader::{Token, TokenKind, TokenReader};
use crate::error::DecodeError;
use crate::options::Options;
use crate::value::{Mapping, Value};
use crate::{number, timestamp};

/// Decode exactly one document. Empty input is an error.
pub fn read_value<'de, R: TokenReader<'de>>(
    reader: &mut R,
    options: &Options,
) -> Result<Value, DecodeError> {
    let Some(token) = reader.next_token()? else {
        return Err(DecodeError::UnexpectedEof {
            offset: reader.offset(),
        });
    };
    let value = Inference::new(options).value(token, reader, 0)?;
    expect_end(reader)?;
    Ok(value)
}

/// Decode a document whose root must be an object. Empty input yields an empty mapping.
pub fn read_mapping<'de, R: TokenReader<'de>>(
    reader: &mut R,
    options: &Options,
) -> Result<Mapping, DecodeError> {
    let mapping = match reader.next_token()? {
        None => return Ok(Mapping::new()),
        Some(Token::BeginObject) => Inference::new(options).members(reader, 1)?,
        Some(other) => {
            return Err(DecodeError::TokenMismatch {
                offset: reader.offset(),
                expected: "start of object",
                found: other.kind(),
            });
        }
    };
    expect_end(reader)?;
    Ok(mapping)
}

fn expect_end<'de, R: TokenReader<'de>>(reader: &mut R) -> Result<(), DecodeError> {
    match reader.next_token()? {
        None => Ok(()),
        Some(extra) => Err(DecodeError::TokenMismatch {
            offset: reader.offset(),
            expected: "end of input",
            found: extra.kind(),
        }),
    }
}

/// Infer the native value for a JSON string: timestamp when it fully parses, text otherwise.
pub fn infer_string(s: std::borrow::Cow<'_, str>) -> Value {
    match timestamp::parse(&s) {
        Some(ts) => Value::Timestamp(ts),
        None => Value::Text(s.into_owned()),
    }
}

struct Inference {
    max_depth: usize,
}

impl Inference {
    fn new(options: &Options) -> Self {
        Self {
            max_depth: options.max_depth,
        }
    }

    fn value<'de, R: TokenReader<'de>>(
        &self,
        token: Token<'de>,
        reader: &mut R,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        match token {
            Token::Null => Ok(Value::Null),
            Token::Bool(b) => Ok(Value::Bool(b)),
            Token::Number(literal) => number::infer(literal, reader.offset()),
            Token::String(s) => Ok(infer_string(s)),
            Token::BeginArray => self.elements(reader, depth + 1).map(Value::Sequence),
            Token::BeginObject => self.members(reader, depth + 1).map(Value::Mapping),
            other => Err(DecodeError::TokenMismatch {
                offset: reader.offset(),
                expected: "a value",
                found: other.kind(),
            }),
        }
    }

    fn enter<'de, R: TokenReader<'de>>(&self, reader: &R, depth: usize) -> Result<(), DecodeError> {
        if depth > self.max_depth {
            return Err(DecodeError::DepthLimitExceeded {
                offset: reader.offset(),
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }

    fn elements<'de, R: TokenReader<'de>>(
        &self,
        reader: &mut R,
        depth: usize,
    ) -> Result<Vec<Value>, DecodeError> {
        self.enter(reader, depth)?;
        let mut items = Vec::new();
        loop {
            match reader.next_token()? {
                Some(Token::EndArray) => return Ok(items),
                Some(token) => items.push(self.value(token, reader, depth)?),
                None => return Err(truncated(reader, TokenKind::EndArray)),
            }
        }
    }

    fn members<'de, R: TokenReader<'de>>(
        &self,
        reader: &mut R,
        depth: usize,
    ) -> Result<Mapping, DecodeError> {
        self.enter(reader, depth)?;
        let mut mapping = Mapping::new();
        loop {
            let key = match reader.next_token()? {
                Some(Token::EndObject) => return Ok(mapping),
                Some(Token::PropertyName(name)) => name.into_owned(),
                Some(other) => {
                    return Err(DecodeError::TokenMismatch {
                        offset: reader.offset(),
                        expected: "property name",
                        found: other.kind(),
                    });
                }
                None => return Err(truncated(reader, TokenKind::EndObject)),
            };
            let Some(token) = reader.next_token()? else {
                return Err(truncated(reader, TokenKind::EndObject));
            };
            let value = self.value(token, reader, depth)?;
            // Duplicate keys: last value wins, first position is kept
            mapping.insert(key, value);
        }
    }
}

fn truncated<'de, R: TokenReader<'de>>(reader: &R, expected: TokenKind) -> DecodeError {
    DecodeError::TokenMismatch {
        offset: reader.offset(),
        expected: match expected {
            TokenKind::EndArray => "end of array",
            _ => "end of object",
        },
        found: TokenKind::EndOfInput,
    }
}
