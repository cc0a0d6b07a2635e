//! Canonical expand request shared by both transports
//!
//! Each transport turns its own input into an [`ExpandRequest`] and reports
//! problems as a [`RequestError`]. Field presence is checked once, by
//! [`validate_subject_set`], so the check order is identical everywhere:
//! namespace, then object, then relation, stopping at the first violation.

use std::fmt;

use expand_engine::{Subject, SubjectSet};
use serde::Deserialize;
use thiserror::Error;
use utoipa::IntoParams;

/// A required subject-set field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Namespace,
    Object,
    Relation,
}

impl RequiredField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Object => "object",
            Self::Relation => "relation",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `max-depth` was not an integer literal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DepthParseError {
    #[error("parsing {0:?}: invalid syntax")]
    InvalidSyntax(String),

    #[error("parsing {0:?}: value out of range")]
    OutOfRange(String),
}

/// Why a request was rejected before reaching the engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error(transparent)]
    InvalidDepth(#[from] DepthParseError),

    #[error("{0}")]
    MalformedSubject(String),

    #[error("{0} is required")]
    MissingField(RequiredField),
}

/// Transport-independent expand request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandRequest {
    pub subject_set: SubjectSet,
    pub max_depth: i64,
}

impl ExpandRequest {
    pub fn new(subject_set: SubjectSet, max_depth: i64) -> Self {
        Self {
            subject_set,
            max_depth,
        }
    }

    /// Build a request from `GET /expand` query parameters
    ///
    /// `max-depth` is parsed before anything else is looked at, so a bad
    /// depth is reported even when the subject-set fields are missing too.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDepth` when `max-depth` is absent or not an integer literal.
    pub fn from_query(query: ExpandQuery) -> Result<Self, RequestError> {
        let max_depth = parse_max_depth(query.max_depth.as_deref().unwrap_or_default())?;
        Ok(Self::new(query.into_subject_set(), max_depth))
    }
}

/// Check that namespace, object and relation are present, in that order
///
/// # Errors
///
/// Returns the first missing field.
pub fn validate_subject_set(subject_set: &SubjectSet) -> Result<(), RequiredField> {
    if subject_set.namespace.is_empty() {
        return Err(RequiredField::Namespace);
    }
    if subject_set.object.is_empty() {
        return Err(RequiredField::Object);
    }
    if subject_set.relation.is_empty() {
        return Err(RequiredField::Relation);
    }
    Ok(())
}

/// Query parameters of `GET /expand`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExpandQuery {
    /// Maximum traversal depth; accepts `0x`, `0o`, `0b` and leading-zero octal literals
    #[serde(rename = "max-depth")]
    #[param(required = true, value_type = String, example = "5")]
    pub max_depth: Option<String>,
    /// Namespace of the subject set to expand
    pub namespace: Option<String>,
    /// Object of the subject set to expand
    pub object: Option<String>,
    /// Relation of the subject set to expand
    pub relation: Option<String>,
    /// Nested subject given as a plain id
    pub subject_id: Option<String>,
    /// Nested subject set namespace
    #[serde(rename = "subject_set.namespace")]
    pub subject_set_namespace: Option<String>,
    /// Nested subject set object
    #[serde(rename = "subject_set.object")]
    pub subject_set_object: Option<String>,
    /// Nested subject set relation
    #[serde(rename = "subject_set.relation")]
    pub subject_set_relation: Option<String>,
}

/// Collect raw query pairs; the first value of a repeated key wins and
/// unknown keys are ignored
impl<K, V> FromIterator<(K, V)> for ExpandQuery
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "max-depth" => &mut query.max_depth,
                "namespace" => &mut query.namespace,
                "object" => &mut query.object,
                "relation" => &mut query.relation,
                "subject_id" => &mut query.subject_id,
                "subject_set.namespace" => &mut query.subject_set_namespace,
                "subject_set.object" => &mut query.subject_set_object,
                "subject_set.relation" => &mut query.subject_set_relation,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }
}

impl ExpandQuery {
    /// Subject set named by the query; absent fields become empty strings
    pub fn into_subject_set(self) -> SubjectSet {
        let nested = match self.subject_id {
            Some(id) => Some(Subject::Id(id)),
            None if self.subject_set_namespace.is_some()
                || self.subject_set_object.is_some()
                || self.subject_set_relation.is_some() =>
            {
                Some(Subject::Set(SubjectSet::new(
                    self.subject_set_namespace.as_deref().unwrap_or_default(),
                    self.subject_set_object.as_deref().unwrap_or_default(),
                    self.subject_set_relation.as_deref().unwrap_or_default(),
                )))
            }
            None => None,
        };

        SubjectSet {
            namespace: self.namespace.unwrap_or_default(),
            object: self.object.unwrap_or_default(),
            relation: self.relation.unwrap_or_default(),
            subject: nested.map(Box::new),
        }
    }
}

/// Parse an integer literal with its base taken from the prefix
///
/// `0x`/`0X` is hexadecimal, `0o`/`0O` and a bare leading `0` are octal,
/// `0b`/`0B` is binary, anything else is decimal. A leading `+` or `-` is
/// allowed, and `_` may separate digits (or follow a base prefix).
///
/// # Errors
///
/// `InvalidSyntax` for anything that is not such a literal, `OutOfRange`
/// when the value does not fit an `i64`.
pub fn parse_max_depth(input: &str) -> Result<i64, DepthParseError> {
    let syntax = || DepthParseError::InvalidSyntax(input.to_string());
    let range = || DepthParseError::OutOfRange(input.to_string());

    let (negative, unsigned) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    if unsigned.is_empty() {
        return Err(syntax());
    }

    let (radix, digits) = split_radix(unsigned);

    let mut value: u64 = 0;
    let mut saw_underscore = false;
    for c in digits.chars() {
        if c == '_' {
            saw_underscore = true;
            continue;
        }
        let digit = c.to_digit(radix).ok_or_else(syntax)?;
        value = value
            .checked_mul(u64::from(radix))
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or_else(range)?;
    }

    if saw_underscore && !underscores_ok(unsigned) {
        return Err(syntax());
    }

    if negative {
        if value == i64::MIN.unsigned_abs() {
            return Ok(i64::MIN);
        }
        i64::try_from(value)
            .ok()
            .and_then(i64::checked_neg)
            .ok_or_else(range)
    } else {
        i64::try_from(value).map_err(|_| range())
    }
}

fn split_radix(s: &str) -> (u32, &str) {
    const PREFIXES: [(&str, u32); 6] = [
        ("0x", 16),
        ("0X", 16),
        ("0o", 8),
        ("0O", 8),
        ("0b", 2),
        ("0B", 2),
    ];

    // a prefix needs at least one character after it, "0x" alone is octal "x"
    if s.len() >= 3 {
        for (prefix, radix) in PREFIXES {
            if let Some(rest) = s.strip_prefix(prefix) {
                return (radix, rest);
            }
        }
    }

    match s.strip_prefix('0') {
        Some(rest) => (8, rest),
        None => (10, s),
    }
}

/// Underscores may only sit between digits, or between a base prefix and a digit
fn underscores_ok(s: &str) -> bool {
    #[derive(PartialEq)]
    enum Last {
        Start,
        Digit,
        Underscore,
        Other,
    }

    let lower = s.to_ascii_lowercase();
    let (hex, body, mut last) = match lower.get(..2) {
        Some("0x") => (true, lower.get(2..).unwrap_or_default(), Last::Digit),
        Some("0o" | "0b") => (false, lower.get(2..).unwrap_or_default(), Last::Digit),
        _ => (false, lower.as_str(), Last::Start),
    };

    for c in body.chars() {
        if c.is_ascii_digit() || (hex && ('a'..='f').contains(&c)) {
            last = Last::Digit;
        } else if c == '_' {
            if last != Last::Digit {
                return false;
            }
            last = Last::Underscore;
        } else {
            if last == Last::Underscore {
                return false;
            }
            last = Last::Other;
        }
    }

    last != Last::Underscore
}
