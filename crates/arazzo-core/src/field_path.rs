use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldPathSegment {
    Key(String),
    Index(usize),
}

/// Location of a node or field inside a decoded document, rendered as
/// `$.workflows[0].steps[1].stepId`. Keys that are not plain identifiers
/// render in bracket form: `$.outputs["pet id"]`. Serializes as that string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<FieldPathSegment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self { segments: Vec::new() }
    }

    pub fn from_segments(segments: Vec<FieldPathSegment>) -> Self {
        Self { segments }
    }

    pub fn join_key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(FieldPathSegment::Key(key.into()));
        Self { segments }
    }

    pub fn join_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(FieldPathSegment::Index(index));
        Self { segments }
    }

    pub fn segments(&self) -> &[FieldPathSegment] {
        &self.segments
    }

    pub fn last_key(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|segment| match segment {
            FieldPathSegment::Key(key) => Some(key.as_str()),
            FieldPathSegment::Index(_) => None,
        })
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Default for FieldPath {
    fn default() -> Self {
        Self::root()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldPathParseError {
    #[error("field path must start with '$' or an identifier")]
    InvalidStart,
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("invalid index segment")]
    InvalidIndex,
    #[error("invalid quoted key segment")]
    InvalidQuotedKey,
    #[error("expected '.' before key segment")]
    MissingDot,
    #[error("invalid key segment")]
    InvalidKey,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_identifier(key: &str) -> bool {
    !key.is_empty() && key.chars().all(is_identifier_char)
}

impl std::str::FromStr for FieldPath {
    type Err = FieldPathParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut chars = input.char_indices().peekable();
        let mut segments = Vec::new();

        match chars.peek() {
            None => return Err(FieldPathParseError::InvalidStart),
            Some((_, '$')) => {
                chars.next();
            }
            Some((_, c)) if is_identifier_char(*c) => {
                let key = take_identifier(input, &mut chars);
                segments.push(FieldPathSegment::Key(key));
            }
            Some((_, _)) => return Err(FieldPathParseError::InvalidStart),
        }

        while let Some((_, c)) = chars.next() {
            match c {
                '.' => {
                    if chars.peek().is_none() {
                        return Err(FieldPathParseError::UnexpectedEnd);
                    }
                    let key = take_identifier(input, &mut chars);
                    if key.is_empty() {
                        return Err(FieldPathParseError::InvalidKey);
                    }
                    segments.push(FieldPathSegment::Key(key));
                }
                '[' => match chars.peek() {
                    Some((_, '"')) => {
                        chars.next();
                        segments.push(FieldPathSegment::Key(take_quoted(&mut chars)?));
                    }
                    _ => {
                        let mut digits = String::new();
                        while let Some((_, d)) = chars.peek().copied() {
                            if !d.is_ascii_digit() {
                                break;
                            }
                            digits.push(d);
                            chars.next();
                        }
                        if digits.is_empty() || !matches!(chars.next(), Some((_, ']'))) {
                            return Err(FieldPathParseError::InvalidIndex);
                        }
                        let index = digits
                            .parse::<usize>()
                            .map_err(|_| FieldPathParseError::InvalidIndex)?;
                        segments.push(FieldPathSegment::Index(index));
                    }
                },
                c if is_identifier_char(c) => return Err(FieldPathParseError::MissingDot),
                other => return Err(FieldPathParseError::UnexpectedChar(other)),
            }
        }

        Ok(FieldPath::from_segments(segments))
    }
}

fn take_identifier(
    input: &str,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) -> String {
    let Some((start, _)) = chars.peek().copied() else {
        return String::new();
    };
    let mut end = start;
    while let Some((position, c)) = chars.peek().copied() {
        if !is_identifier_char(c) {
            break;
        }
        end = position + c.len_utf8();
        chars.next();
    }
    input[start..end].to_string()
}

fn take_quoted(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) -> Result<String, FieldPathParseError> {
    let mut key = String::new();
    loop {
        match chars.next() {
            Some((_, '\\')) => match chars.next() {
                Some((_, escaped @ ('"' | '\\'))) => key.push(escaped),
                _ => return Err(FieldPathParseError::InvalidQuotedKey),
            },
            Some((_, '"')) => break,
            Some((_, c)) => key.push(c),
            None => return Err(FieldPathParseError::InvalidQuotedKey),
        }
    }
    match chars.next() {
        Some((_, ']')) => Ok(key),
        _ => Err(FieldPathParseError::InvalidQuotedKey),
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            match segment {
                FieldPathSegment::Key(key) if is_identifier(key) => write!(f, ".{key}")?,
                FieldPathSegment::Key(key) => {
                    let escaped = key.replace('\\', "\\\\").replace('"', "\\\"");
                    write!(f, "[\"{escaped}\"]")?
                }
                FieldPathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "field_path_test.rs"]
mod tests;
