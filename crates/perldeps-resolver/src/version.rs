//! Loose version ordering for package constraints.
//!
//! Constraint strings are dotted tuples (`5.8.1`, `0.9_01`, sometimes just
//! `2`); segments split on `.`, `-` and `_`, numeric segments compare as
//! numbers, non-numeric tails compare as text, and a missing version sorts
//! lowest. This is not pacman's full vercmp, just enough to pick the
//! binding constraint among the versions Koha actually declares.

use std::cmp::Ordering;
use std::fmt;

/// A parsed version with comparable segments.
#[derive(Debug, Clone)]
pub struct PkgVersion {
    pub original: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Segment {
    Numeric(u64),
    Text(String),
}

impl PkgVersion {
    pub fn parse(version: &str) -> Self {
        let segments = version
            .split(['.', '-', '_'])
            .filter(|s| !s.is_empty())
            .map(|token| match token.parse::<u64>() {
                Ok(n) => Segment::Numeric(n),
                Err(_) => Segment::Text(token.to_string()),
            })
            .collect();
        Self {
            original: version.to_string(),
            segments,
        }
    }
}

impl fmt::Display for PkgVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Ord for PkgVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let max_len = self.segments.len().max(other.segments.len());
        for i in 0..max_len {
            let ord = match (self.segments.get(i), other.segments.get(i)) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(a), Some(b)) => compare_segments(a, b),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for PkgVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PkgVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PkgVersion {}

fn compare_segments(a: &Segment, b: &Segment) -> Ordering {
    match (a, b) {
        (Segment::Numeric(a), Segment::Numeric(b)) => a.cmp(b),
        (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
        // A numbered release outranks a lettered one at the same position.
        (Segment::Numeric(_), Segment::Text(_)) => Ordering::Greater,
        (Segment::Text(_), Segment::Numeric(_)) => Ordering::Less,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_ordering() {
        assert!(PkgVersion::parse("1.2") < PkgVersion::parse("1.5"));
        assert!(PkgVersion::parse("1.5") < PkgVersion::parse("1.10"));
        assert!(PkgVersion::parse("2") > PkgVersion::parse("1.9.9"));
    }

    #[test]
    fn numeric_not_lexicographic() {
        assert!(PkgVersion::parse("0.90") > PkgVersion::parse("0.9"));
        assert!(PkgVersion::parse("5.10.1") > PkgVersion::parse("5.8.1"));
    }

    #[test]
    fn missing_version_sorts_lowest() {
        assert!(PkgVersion::parse("") < PkgVersion::parse("0.01"));
        assert!(PkgVersion::parse("1.2") < PkgVersion::parse("1.2.0"));
    }

    #[test]
    fn underscore_versions_split() {
        assert!(PkgVersion::parse("0.9_01") > PkgVersion::parse("0.9"));
        assert!(PkgVersion::parse("0.9_01") < PkgVersion::parse("0.9.2"));
    }

    #[test]
    fn equal_versions() {
        assert_eq!(PkgVersion::parse("1.2.3"), PkgVersion::parse("1.2.3"));
        assert_eq!(PkgVersion::parse(""), PkgVersion::parse(""));
    }

    #[test]
    fn display_keeps_the_original() {
        assert_eq!(PkgVersion::parse("0.9_01").to_string(), "0.9_01");
    }
}
