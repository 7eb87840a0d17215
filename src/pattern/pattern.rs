// Wed Oct 14 2026 - Alex

use crate::pattern::{PatternByte, PatternError};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Byte template with wildcards, e.g. `f0 41 ?? 5c`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern {
    elements: Vec<PatternByte>,
}

impl Pattern {
    /// Compiles whitespace separated tokens, each a two digit hex byte or `??`.
    pub fn compile(text: &str) -> Result<Self, PatternError> {
        let elements = text
            .split_whitespace()
            .map(|token| PatternByte::parse(token).ok_or_else(|| PatternError::InvalidToken(token.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        if elements.is_empty() {
            return Err(PatternError::Empty);
        }
        Ok(Self { elements })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PatternError> {
        if bytes.is_empty() {
            return Err(PatternError::Empty);
        }
        Ok(Self {
            elements: bytes.iter().copied().map(PatternByte::Byte).collect(),
        })
    }

    /// `self` followed by `other`.
    pub fn join(&self, other: &Pattern) -> Pattern {
        let mut elements = self.elements.clone();
        elements.extend_from_slice(&other.elements);
        Self { elements }
    }

    pub fn elements(&self) -> &[PatternByte] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn wildcard_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_wildcard()).count()
    }

    /// True if the pattern matches `haystack` starting at `pos`.
    pub fn matches_at(&self, haystack: &[u8], pos: usize) -> bool {
        match haystack.get(pos..pos + self.len()) {
            Some(window) => self.elements.iter().zip(window).all(|(element, &byte)| element.matches(byte)),
            None => false,
        }
    }

    /// Lazily yields every offset where the pattern matches, overlaps included.
    pub fn find_matches<'a>(&'a self, haystack: &'a [u8]) -> Matches<'a> {
        Matches {
            pattern: self,
            haystack,
            pos: 0,
            last: haystack.len().checked_sub(self.len()),
        }
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl TryFrom<String> for Pattern {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::compile(&value)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.to_string()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.elements.iter().join(" "))
    }
}

/// Iterator returned by [`Pattern::find_matches`].
#[derive(Clone)]
pub struct Matches<'a> {
    pattern: &'a Pattern,
    haystack: &'a [u8],
    pos: usize,
    last: Option<usize>,
}

impl Iterator for Matches<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let last = self.last?;
        while self.pos <= last {
            let pos = self.pos;
            self.pos += 1;
            if self.pattern.matches_at(self.haystack, pos) {
                return Some(pos);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(haystack: &[u8], pattern: &Pattern) -> Vec<usize> {
        pattern.find_matches(haystack).collect()
    }

    #[test]
    fn test_compile() {
        let pattern = Pattern::compile("f0 41 45 5c ?? ?? ?? ??").unwrap();
        assert_eq!(pattern.len(), 8);
        assert_eq!(pattern.wildcard_count(), 4);
        assert_eq!(pattern.elements()[0], PatternByte::Byte(0xf0));
        assert_eq!(pattern.elements()[7], PatternByte::Any);
    }

    #[test]
    fn test_compile_single_wildcard() {
        let pattern = Pattern::compile("??").unwrap();
        assert_eq!(pattern.elements(), &[PatternByte::Any]);
    }

    #[test]
    fn test_compile_errors() {
        assert_eq!(Pattern::compile("zz"), Err(PatternError::InvalidToken("zz".to_string())));
        assert_eq!(Pattern::compile("f0 4"), Err(PatternError::InvalidToken("4".to_string())));
        assert_eq!(Pattern::compile(""), Err(PatternError::Empty));
        assert_eq!(Pattern::compile("   \t "), Err(PatternError::Empty));
        assert!("F0  41\t??".parse::<Pattern>().is_ok());
    }

    #[test]
    fn test_display_is_lowercase() {
        let pattern = Pattern::compile("F0 41 ?? 5C").unwrap();
        assert_eq!(pattern.to_string(), "f0 41 ?? 5c");
    }

    #[test]
    fn test_find_single_match() {
        let pattern = Pattern::from_bytes(&[0x45, 0x46]).unwrap();
        assert_eq!(find(&[0x45, 0x46], &pattern), vec![0]);
    }

    #[test]
    fn test_find_match_at_end() {
        let pattern = Pattern::from_bytes(&[0x45, 0x46]).unwrap();
        assert_eq!(find(&[0x00, 0x00, 0x00, 0x45, 0x46], &pattern), vec![3]);
    }

    #[test]
    fn test_find_multiple_matches() {
        let pattern = Pattern::from_bytes(&[0x45, 0x46]).unwrap();
        assert_eq!(find(&[0x45, 0x46, 0x00, 0x45, 0x46], &pattern), vec![0, 3]);
    }

    #[test]
    fn test_find_in_text() {
        let haystack = b"this is a test message test one test two";
        let pattern = Pattern::from_bytes(b"test").unwrap();
        assert_eq!(find(haystack, &pattern), vec![10, 23, 32]);
    }

    #[test]
    fn test_overlapping_matches() {
        let pattern = Pattern::from_bytes(b"aa").unwrap();
        assert_eq!(find(b"aaaa", &pattern), vec![0, 1, 2]);
    }

    #[test]
    fn test_wildcards() {
        let pattern = Pattern::compile("01 ??").unwrap();
        assert_eq!(find(&[0x00, 0x01, 0x02, 0x01, 0x03], &pattern), vec![1, 3]);

        let all = Pattern::compile("?? ?? ??").unwrap();
        assert_eq!(find(&[9, 8, 7, 6, 5], &all), vec![0, 1, 2]);
    }

    #[test]
    fn test_haystack_shorter_than_pattern() {
        let pattern = Pattern::from_bytes(b"longer").unwrap();
        assert!(find(b"long", &pattern).is_empty());
        assert!(find(b"", &pattern).is_empty());
    }

    #[test]
    fn test_matches_is_restartable() {
        let pattern = Pattern::from_bytes(b"ab").unwrap();
        let haystack = b"abcabcab";

        let mut matches = pattern.find_matches(haystack);
        assert_eq!(matches.next(), Some(0));
        let rest = matches.clone();
        assert_eq!(matches.collect::<Vec<_>>(), vec![3, 6]);
        assert_eq!(rest.collect::<Vec<_>>(), vec![3, 6]);
        assert_eq!(find(haystack, &pattern), vec![0, 3, 6]);
    }

    #[test]
    fn test_matches_brute_force() {
        let haystack: Vec<u8> = (0..512u32).map(|i| (i * 7 % 5) as u8).collect();
        let needle = [2u8, 4, 1];
        let pattern = Pattern::from_bytes(&needle).unwrap();

        let expected: Vec<usize> = (0..=haystack.len() - needle.len())
            .filter(|&i| haystack[i..i + needle.len()] == needle)
            .collect();
        assert!(!expected.is_empty());
        assert_eq!(find(&haystack, &pattern), expected);
    }

    #[test]
    fn test_join_and_serde() {
        let joined = Pattern::compile("f0 41").unwrap().join(&Pattern::compile("?? 5c").unwrap());
        assert_eq!(joined.to_string(), "f0 41 ?? 5c");

        let json = serde_json::to_string(&joined).unwrap();
        assert_eq!(json, "\"f0 41 ?? 5c\"");
        let back: Pattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, joined);
        assert!(serde_json::from_str::<Pattern>("\"zz\"").is_err());
    }
}
