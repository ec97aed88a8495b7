//! Object identifiers and their canonical string codec.
//!
//! The canonical form is `G=<group>,K=<kind>,NS=<namespace>,N=<name>`.
//! Field values escape `\`, `,` and `=` with a leading backslash, so every
//! identifier encodes and decodes losslessly. Decoding accepts only the
//! canonical form: all four fields, each exactly once, in order, and no
//! escapes other than those three.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::types::{GroupKind, ObjectKey};
use crate::error::DecodeError;

const ESCAPE: char = '\\';
const FIELD_SEPARATOR: char = ',';
const KEY_VALUE_SEPARATOR: char = '=';

/// Uniquely identifies an object in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ObjectId {
    group: String,
    kind: String,
    namespace: String,
    name: String,
}

impl ObjectId {
    /// Create an identifier. Empty group and namespace are valid.
    pub fn new(
        group: impl Into<String>,
        kind: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            kind: kind.into(),
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// API group.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Object kind.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Object name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Group/kind pair used to bucket link results.
    pub fn group_kind(&self) -> GroupKind {
        GroupKind::new(self.group.clone(), self.kind.clone())
    }

    /// Namespace/name pair used to fetch the object body.
    pub fn object_key(&self) -> ObjectKey {
        ObjectKey {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
        }
    }

    /// Canonical string encoding.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Decode the canonical string encoding.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] for any input that is not in canonical form.
    /// Missing fields are never defaulted.
    pub fn parse(input: &str) -> Result<Self, DecodeError> {
        if input.is_empty() {
            return Err(DecodeError::Empty);
        }

        let mut slots: [Option<(usize, String)>; 4] = [None, None, None, None];
        for (position, segment) in split_unescaped(input, FIELD_SEPARATOR).into_iter().enumerate() {
            let parts = split_unescaped(segment, KEY_VALUE_SEPARATOR);
            let &[tag, raw_value] = parts.as_slice() else {
                return Err(DecodeError::MalformedSegment {
                    segment: segment.to_string(),
                    input: input.to_string(),
                });
            };

            let field = Field::from_tag(tag).ok_or_else(|| DecodeError::UnknownField {
                field: tag.to_string(),
                input: input.to_string(),
            })?;
            let slot = &mut slots[field as usize];
            if slot.is_some() {
                return Err(DecodeError::DuplicateField {
                    field: field.tag(),
                    input: input.to_string(),
                });
            }
            *slot = Some((position, unescape(raw_value, input)?));
        }

        let mut take = |field: Field| -> Result<String, DecodeError> {
            let (position, value) =
                slots[field as usize]
                    .take()
                    .ok_or_else(|| DecodeError::MissingField {
                        field: field.tag(),
                        input: input.to_string(),
                    })?;
            if position != field as usize {
                return Err(DecodeError::OutOfOrder {
                    field: field.tag(),
                    input: input.to_string(),
                });
            }
            Ok(value)
        };

        Ok(Self {
            group: take(Field::Group)?,
            kind: take(Field::Kind)?,
            namespace: take(Field::Namespace)?,
            name: take(Field::Name)?,
        })
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "G={},K={},NS={},N={}",
            Escaped(&self.group),
            Escaped(&self.kind),
            Escaped(&self.namespace),
            Escaped(&self.name)
        )
    }
}

impl FromStr for ObjectId {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Field tags in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Group = 0,
    Kind = 1,
    Namespace = 2,
    Name = 3,
}

impl Field {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "G" => Some(Self::Group),
            "K" => Some(Self::Kind),
            "NS" => Some(Self::Namespace),
            "N" => Some(Self::Name),
            _ => None,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Self::Group => "G",
            Self::Kind => "K",
            Self::Namespace => "NS",
            Self::Name => "N",
        }
    }
}

/// Writes a field value with separators escaped.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for ch in self.0.chars() {
            if matches!(ch, ESCAPE | FIELD_SEPARATOR | KEY_VALUE_SEPARATOR) {
                f.write_char(ESCAPE)?;
            }
            f.write_char(ch)?;
        }
        Ok(())
    }
}

/// Split on every occurrence of `delim` not preceded by an escape.
/// Escape sequences are kept intact in the returned slices.
fn split_unescaped(s: &str, delim: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut chars = s.char_indices();
    while let Some((idx, ch)) = chars.next() {
        if ch == ESCAPE {
            chars.next();
        } else if ch == delim {
            parts.push(&s[start..idx]);
            start = idx + ch.len_utf8();
        }
    }
    parts.push(&s[start..]);
    parts
}

fn unescape(raw: &str, input: &str) -> Result<String, DecodeError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == ESCAPE {
            let escaped = chars.next().ok_or_else(|| DecodeError::DanglingEscape {
                input: input.to_string(),
            })?;
            if !matches!(escaped, ESCAPE | FIELD_SEPARATOR | KEY_VALUE_SEPARATOR) {
                return Err(DecodeError::InvalidEscape {
                    escaped,
                    input: input.to_string(),
                });
            }
            out.push(escaped);
        } else {
            out.push(ch);
        }
    }
    Ok(out)
}
