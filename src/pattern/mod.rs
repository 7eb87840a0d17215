// Wed Oct 14 2026 - Alex

pub mod builder;
pub mod criteria;
pub mod error;
pub mod pattern;
pub mod wildcard;

pub use builder::{encode_lu32, encode_pointer, PatternBuilder};
pub use criteria::{filter_by_criteria, read_typed_value, Criterion, NumericFormat};
pub use error::PatternError;
pub use pattern::{Matches, Pattern};
pub use wildcard::PatternByte;

/// Offsets of `pattern` in `haystack` that survive `criteria`.
pub fn search(haystack: &[u8], pattern: &Pattern, criteria: &[Criterion]) -> Vec<usize> {
    let matches = pattern.find_matches(haystack);
    if criteria.is_empty() {
        return matches.collect();
    }
    filter_by_criteria(matches, haystack, criteria)
}
