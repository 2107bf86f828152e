//! Registry-compatible version comparison.
//!
//! This is the ordering the WordPress registry applies to plugin and theme
//! versions, not semantic versioning. Versions are canonicalized into
//! dot-separated segments and compared segment by segment:
//!
//! - numeric segments compare as integers
//! - word segments compare by a prefix rank:
//!   anything else < `dev` < `alpha` = `a` < `beta` = `b` < `RC` = `rc` < `#` < `pl` = `p`
//! - a numeric segment against a word ranks as `#`
//!
//! # Examples
//!
//! ```
//! use wpgu_core::version::{Operator, compare};
//!
//! assert!(compare("1.0rc1", "1.0", Operator::Lt));
//! assert!(compare("1.0-beta", "1.0-RC", Operator::Lt));
//! assert!(compare("1.0pl1", "1.0", Operator::Gt));
//! assert!(compare("5.3.1", "5.10", Operator::Lt));
//! ```

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Stands in for a numeric segment when resolving leftover segments.
const NUMERIC_MARKER: &[u8] = b"#N#";

/// Special forms matched by case-sensitive prefix.
const SPECIAL_FORMS: [(&str, i8); 10] = [
    ("dev", 0),
    ("alpha", 1),
    ("a", 1),
    ("beta", 2),
    ("b", 2),
    ("RC", 3),
    ("rc", 3),
    ("#", 4),
    ("pl", 5),
    ("p", 5),
];

/// Rank of a segment that matches no special form.
const UNRECOGNIZED: i8 = -1;

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `<`, `lt`
    Lt,
    /// `<=`, `le`
    Le,
    /// `>`, `gt`
    Gt,
    /// `>=`, `ge`
    Ge,
    /// `==`, `=`, `eq`
    Eq,
    /// `!=`, `<>`, `ne`
    Ne,
}

impl Operator {
    /// Whether `ordering` (left compared to right) satisfies the operator.
    pub fn matches(self, ordering: Ordering) -> bool {
        match self {
            Operator::Lt => ordering == Ordering::Less,
            Operator::Le => ordering != Ordering::Greater,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Ge => ordering != Ordering::Less,
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Ne => ordering != Ordering::Equal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Eq => "==",
            Operator::Ne => "!=",
        }
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "<" | "lt" => Ok(Operator::Lt),
            "<=" | "le" => Ok(Operator::Le),
            ">" | "gt" => Ok(Operator::Gt),
            ">=" | "ge" => Ok(Operator::Ge),
            "==" | "=" | "eq" => Ok(Operator::Eq),
            "!=" | "<>" | "ne" => Ok(Operator::Ne),
            _ => Err(Error::InvalidOperator {
                operator: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare two versions with `operator`.
pub fn compare(left: &str, right: &str, operator: Operator) -> bool {
    operator.matches(version_cmp(left, right))
}

/// Compare two versions with a textual operator such as `"<"` or `"ge"`.
pub fn compare_with(left: &str, right: &str, operator: &str) -> Result<bool> {
    Ok(compare(left, right, operator.parse()?))
}

/// Order two versions.
///
/// The empty string sorts before every other version.
pub fn version_cmp(left: &str, right: &str) -> Ordering {
    compare_bytes(left.as_bytes(), right.as_bytes())
}

fn compare_bytes(left: &[u8], right: &[u8]) -> Ordering {
    match (left.is_empty(), right.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }

    let left = prepare(left);
    let right = prepare(right);
    let mut rest_left: &[u8] = &left;
    let mut rest_right: &[u8] = &right;
    let mut ordering;

    loop {
        let (segment_left, tail_left) = split_segment(rest_left);
        let (segment_right, tail_right) = split_segment(rest_right);
        rest_left = tail_left.unwrap_or_default();
        rest_right = tail_right.unwrap_or_default();

        ordering = compare_segments(segment_left, segment_right);
        if ordering != Ordering::Equal || tail_left.is_none() || tail_right.is_none() {
            break;
        }
    }

    if ordering != Ordering::Equal {
        return ordering;
    }

    // One side ran out; the other side's leftover decides
    if !rest_left.is_empty() {
        resolve_leftover(rest_left)
    } else if !rest_right.is_empty() {
        resolve_leftover(rest_right).reverse()
    } else {
        Ordering::Equal
    }
}

/// Order a leftover tail against the side that has no segments left.
///
/// Leading zero segments pad the shorter side, so `1.0` and `1.0.0`
/// order the same way against every other version.
fn resolve_leftover(rest: &[u8]) -> Ordering {
    let rest = strip_zero_segments(rest);
    if rest.is_empty() {
        Ordering::Equal
    } else if starts_with_digit(rest) {
        Ordering::Greater
    } else {
        compare_bytes(rest, NUMERIC_MARKER)
    }
}

/// Drop leading `0`, `00`, ... segments.
fn strip_zero_segments(mut rest: &[u8]) -> &[u8] {
    loop {
        let (segment, tail) = split_segment(rest);
        if segment.is_empty() || segment.iter().any(|&b| b != b'0') {
            return rest;
        }
        match tail {
            Some(tail) => rest = tail,
            None => return &[],
        }
    }
}

/// Canonicalize unless the version is a `#` sentinel.
fn prepare(version: &[u8]) -> Cow<'_, [u8]> {
    if version.first() == Some(&b'#') {
        Cow::Borrowed(version)
    } else {
        Cow::Owned(canonicalize(version))
    }
}

fn split_segment(version: &[u8]) -> (&[u8], Option<&[u8]>) {
    match version.iter().position(|&b| b == b'.') {
        Some(index) => (&version[..index], Some(&version[index + 1..])),
        None => (version, None),
    }
}

fn starts_with_digit(segment: &[u8]) -> bool {
    segment.first().is_some_and(u8::is_ascii_digit)
}

fn compare_segments(left: &[u8], right: &[u8]) -> Ordering {
    match (starts_with_digit(left), starts_with_digit(right)) {
        (true, true) => compare_numeric(left, right),
        (false, false) => special_rank(left).cmp(&special_rank(right)),
        (true, false) => special_rank(NUMERIC_MARKER).cmp(&special_rank(right)),
        (false, true) => special_rank(left).cmp(&special_rank(NUMERIC_MARKER)),
    }
}

/// Integer comparison of digit segments without overflow.
///
/// A segment that is not purely digits counts as zero.
fn compare_numeric(left: &[u8], right: &[u8]) -> Ordering {
    fn magnitude(segment: &[u8]) -> &[u8] {
        if segment.iter().all(u8::is_ascii_digit) {
            let zeros = segment.iter().take_while(|&&b| b == b'0').count();
            &segment[zeros..]
        } else {
            &[]
        }
    }

    let left = magnitude(left);
    let right = magnitude(right);
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

fn special_rank(segment: &[u8]) -> i8 {
    SPECIAL_FORMS
        .iter()
        .find(|(form, _)| segment.starts_with(form.as_bytes()))
        .map_or(UNRECOGNIZED, |&(_, rank)| rank)
}

/// Rewrite a version into dot-separated segments.
///
/// `-`, `_` and `+` become a single `.`, a `.` is inserted at every
/// digit/non-digit transition and other punctuation collapses into `.`.
/// A boundary is never emitted at the very start.
fn canonicalize(version: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(version.len() * 2);

    for (index, &current) in version.iter().enumerate() {
        let next = version.get(index + 1).copied();
        let current_digit = current.is_ascii_digit();
        let next_digit = next.is_some_and(|b| b.is_ascii_digit());

        if matches!(current, b'-' | b'_' | b'+') {
            push_boundary(&mut out);
        } else if (next.is_some() && current_digit && !next_digit) || (!current_digit && next_digit) {
            out.push(current);
            if current != b'.' && next != Some(b'.') {
                out.push(b'.');
            }
        } else if !current.is_ascii_alphanumeric() {
            push_boundary(&mut out);
        } else {
            out.push(current);
        }
    }

    out
}

fn push_boundary(out: &mut Vec<u8>) {
    if out.last().is_some_and(|&b| b != b'.') {
        out.push(b'.');
    }
}
