//! Natural-order keys: case-insensitive, numeric-aware.
//!
//! A name is lowercased and split into alternating runs of ASCII digits and
//! everything else. Digit runs compare by numeric value, so `a9` sorts
//! before `a10`.

use std::cmp::Ordering;

/// One comparable piece of a sort key.
///
/// Variant order is significant: `Sentinel < Number < Text`. The sentinel
/// never comes out of [`natural_key`]; it is only prepended by the pin-aware
/// key to pull entries ahead of everything else.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Segment {
    Sentinel,
    Number(Digits),
    Text(String),
}

/// A run of ASCII digits compared by numeric value.
///
/// Arbitrarily long runs are supported. Equal values with different
/// zero padding order the less padded run first (`7 < 07`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digits {
    significant: String,
    leading_zeros: usize,
}

impl Digits {
    /// Build from a run of ASCII digits.
    pub fn parse(run: &str) -> Self {
        let significant = run.trim_start_matches('0');
        Self {
            significant: significant.to_string(),
            leading_zeros: run.len() - significant.len(),
        }
    }
}

impl Ord for Digits {
    fn cmp(&self, other: &Self) -> Ordering {
        self.significant
            .len()
            .cmp(&other.significant.len())
            .then_with(|| self.significant.cmp(&other.significant))
            .then_with(|| self.leading_zeros.cmp(&other.leading_zeros))
    }
}

impl PartialOrd for Digits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Split a name into natural-order segments.
pub fn natural_key(name: &str) -> Vec<Segment> {
    let lower = name.to_lowercase();
    let mut segments = Vec::new();
    let mut rest = lower.as_str();

    while let Some(first) = rest.chars().next() {
        let digits = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);

        segments.push(if digits {
            Segment::Number(Digits::parse(run))
        } else {
            Segment::Text(run.to_string())
        });
        rest = tail;
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<&str> = names.to_vec();
        names.sort_by_cached_key(|name| natural_key(name));
        names.into_iter().map(String::from).collect()
    }

    #[test]
    fn test_natural_key_segments() {
        assert_eq!(
            natural_key("File10b"),
            vec![
                Segment::Text("file".to_string()),
                Segment::Number(Digits::parse("10")),
                Segment::Text("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_natural_key_leading_digits() {
        assert_eq!(
            natural_key("2024-notes"),
            vec![
                Segment::Number(Digits::parse("2024")),
                Segment::Text("-notes".to_string()),
            ]
        );
    }

    #[test]
    fn test_natural_key_empty() {
        assert!(natural_key("").is_empty());
    }

    #[test]
    fn test_numeric_ordering() {
        assert_eq!(sorted(&["b2", "a10", "a9"]), vec!["a9", "a10", "b2"]);
        assert_eq!(sorted(&["img12", "img2", "img1"]), vec!["img1", "img2", "img12"]);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(sorted(&["Beta", "alpha", "ALPHA2"]), vec!["alpha", "ALPHA2", "Beta"]);
    }

    #[test]
    fn test_numbers_before_text() {
        assert_eq!(sorted(&["notes", "1notes"]), vec!["1notes", "notes"]);
    }

    #[test]
    fn test_large_numbers_do_not_overflow() {
        let huge = format!("v{}", "9".repeat(40));
        assert_eq!(sorted(&[huge.as_str(), "v100"]), vec!["v100".to_string(), huge]);
    }

    #[test]
    fn test_zero_padding() {
        assert!(Digits::parse("7") < Digits::parse("07"));
        assert!(Digits::parse("07") < Digits::parse("8"));
        assert!(Digits::parse("0") < Digits::parse("1"));
        assert_eq!(Digits::parse("0").cmp(&Digits::parse("0")), Ordering::Equal);
    }

    #[test]
    fn test_sentinel_sorts_first() {
        assert!(Segment::Sentinel < Segment::Number(Digits::parse("0")));
        assert!(Segment::Sentinel < Segment::Text(String::new()));
    }
}
