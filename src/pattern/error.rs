// Wed Oct 14 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Pattern is empty")]
    Empty,
    #[error("Failed to parse: {0}")]
    InvalidToken(String),
    #[error("Value overflows 32 bits: {0}")]
    Overflow(i64),
    #[error("Value underflows 32 bits: {0}")]
    Underflow(i64),
    #[error("Read of {width} bytes at offset {offset} is outside a {len} byte buffer")]
    OutOfBounds { offset: i64, width: usize, len: usize },
}
