//! Property naming policies for structured values.
//!
//! A policy only ever renames the declared field names of a [`Structured`](crate::Structured)
//! record. Keys of a [`Mapping`](crate::Mapping) are data and are always written verbatim.

use std::borrow::Cow;

#[derive(Debug, Clone, Copy, Default)]
pub enum NamingPolicy {
    /// Field names are written as declared
    #[default]
    Verbatim,
    /// `first_name` / `FirstName` -> `firstName`
    CamelCase,
    /// Plain lowercasing, no word splitting
    LowerCase,
    /// `FirstName` -> `first_name`
    SnakeCase,
    /// `FirstName` -> `first-name`
    KebabCase,
    /// Caller-supplied conversion; must be pure
    Custom(fn(&str) -> String),
}

impl NamingPolicy {
    pub fn convert<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            NamingPolicy::Verbatim => Cow::Borrowed(name),
            NamingPolicy::CamelCase => Cow::Owned(to_camel_case(name)),
            NamingPolicy::LowerCase => {
                if name.chars().any(char::is_uppercase) {
                    Cow::Owned(name.to_lowercase())
                } else {
                    Cow::Borrowed(name)
                }
            }
            NamingPolicy::SnakeCase => Cow::Owned(join_lower(name, '_')),
            NamingPolicy::KebabCase => Cow::Owned(join_lower(name, '-')),
            NamingPolicy::Custom(f) => Cow::Owned(f(name)),
        }
    }
}

/// Split an identifier into words on separators and case boundaries.
/// `URLValue` splits as `URL`, `Value`; `first_name2` as `first`, `name2`.
fn split_words(name: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let chars: Vec<(usize, char)> = name.char_indices().collect();
    let mut start: Option<usize> = None;
    for (i, &(pos, c)) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | ' ') {
            if let Some(s) = start.take() {
                words.push(&name[s..pos]);
            }
            continue;
        }
        match start {
            None => start = Some(pos),
            Some(s) => {
                let prev = chars[i - 1].1;
                let next_is_lower = chars.get(i + 1).is_some_and(|&(_, n)| n.is_lowercase());
                let boundary = c.is_uppercase()
                    && (prev.is_lowercase()
                        || prev.is_ascii_digit()
                        || (prev.is_uppercase() && next_is_lower));
                if boundary {
                    words.push(&name[s..pos]);
                    start = Some(pos);
                }
            }
        }
    }
    if let Some(s) = start {
        words.push(&name[s..]);
    }
    words
}

fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (idx, word) in split_words(name).into_iter().enumerate() {
        if idx == 0 {
            out.push_str(&word.to_lowercase());
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

fn join_lower(name: &str, sep: char) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (idx, word) in split_words(name).into_iter().enumerate() {
        if idx > 0 {
            out.push(sep);
        }
        out.push_str(&word.to_lowercase());
    }
    out
}
