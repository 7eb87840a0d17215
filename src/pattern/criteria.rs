// Wed Oct 14 2026 - Alex

use crate::pattern::PatternError;
use serde::{Deserialize, Serialize};

/// Width and byte order of a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericFormat {
    #[serde(rename = "u8")]
    U8,
    #[serde(rename = "lu16")]
    Lu16,
    #[serde(rename = "lu32")]
    Lu32,
    #[serde(rename = "lu64")]
    Lu64,
}

impl NumericFormat {
    pub fn width(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::Lu16 => 2,
            Self::Lu32 => 4,
            Self::Lu64 => 8,
        }
    }
}

/// Decodes an unsigned little-endian value of `format` at `offset`.
pub fn read_typed_value(bytes: &[u8], offset: i64, format: NumericFormat) -> Result<u64, PatternError> {
    let width = format.width();
    let out_of_bounds = PatternError::OutOfBounds {
        offset,
        width,
        len: bytes.len(),
    };

    let start = usize::try_from(offset).map_err(|_| out_of_bounds.clone())?;
    let field = start
        .checked_add(width)
        .and_then(|end| bytes.get(start..end))
        .ok_or(out_of_bounds)?;

    let mut buf = [0u8; 8];
    buf[..width].copy_from_slice(field);
    Ok(u64::from_le_bytes(buf))
}

/// Post-match constraint on a numeric field at `offset` bytes from the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Criterion {
    /// Inclusive bounds; a missing bound is open.
    Range {
        format: NumericFormat,
        offset: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<u64>,
    },
    /// Any of `values`.
    Equal {
        format: NumericFormat,
        offset: i64,
        values: Vec<u64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject,
    Continue,
}

impl Criterion {
    pub fn range(format: NumericFormat, offset: i64, min: Option<u64>, max: Option<u64>) -> Self {
        Self::Range { format, offset, min, max }
    }

    pub fn equal(format: NumericFormat, offset: i64, values: Vec<u64>) -> Self {
        Self::Equal { format, offset, values }
    }

    pub fn format(&self) -> NumericFormat {
        match self {
            Self::Range { format, .. } | Self::Equal { format, .. } => *format,
        }
    }

    pub fn offset(&self) -> i64 {
        match self {
            Self::Range { offset, .. } | Self::Equal { offset, .. } => *offset,
        }
    }

    /// Judges the match at `match_offset` in `haystack`.
    ///
    /// A violated range rejects, a hit in an equal set accepts, anything else
    /// defers to the next criterion. A field outside the haystack rejects.
    pub fn evaluate(&self, haystack: &[u8], match_offset: usize) -> Verdict {
        let field_offset = (match_offset as i64).saturating_add(self.offset());
        let value = match read_typed_value(haystack, field_offset, self.format()) {
            Ok(value) => value,
            Err(_) => return Verdict::Reject,
        };

        match self {
            Self::Range { min, max, .. } => {
                if min.is_some_and(|min| value < min) || max.is_some_and(|max| value > max) {
                    Verdict::Reject
                } else {
                    Verdict::Continue
                }
            }
            Self::Equal { values, .. } => {
                if values.contains(&value) {
                    Verdict::Accept
                } else {
                    Verdict::Continue
                }
            }
        }
    }
}

/// True if the match at `match_offset` survives `criteria`, evaluated in order.
pub fn accepts(criteria: &[Criterion], haystack: &[u8], match_offset: usize) -> bool {
    for criterion in criteria {
        match criterion.evaluate(haystack, match_offset) {
            Verdict::Accept => return true,
            Verdict::Reject => return false,
            Verdict::Continue => {}
        }
    }
    true
}

pub fn filter_by_criteria<I>(offsets: I, haystack: &[u8], criteria: &[Criterion]) -> Vec<usize>
where
    I: IntoIterator<Item = usize>,
{
    offsets
        .into_iter()
        .filter(|&offset| accepts(criteria, haystack, offset))
        .collect()
}
