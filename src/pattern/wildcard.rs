// Wed Oct 14 2026 - Alex

use std::fmt;

/// One element of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternByte {
    Any,
    Byte(u8),
}

impl PatternByte {
    pub const WILDCARD: &'static str = "??";

    pub fn matches(&self, byte: u8) -> bool {
        match self {
            Self::Any => true,
            Self::Byte(b) => *b == byte,
        }
    }

    /// Parses a two-digit hex byte (any case) or `??`.
    pub fn parse(token: &str) -> Option<Self> {
        if token == Self::WILDCARD {
            return Some(Self::Any);
        }
        if token.len() != 2 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u8::from_str_radix(token, 16).ok().map(Self::Byte)
    }

    pub fn to_byte(&self) -> Option<u8> {
        match self {
            Self::Any => None,
            Self::Byte(b) => Some(*b),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl From<u8> for PatternByte {
    fn from(byte: u8) -> Self {
        Self::Byte(byte)
    }
}

impl fmt::Display for PatternByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str(Self::WILDCARD),
            Self::Byte(b) => write!(f, "{:02x}", b),
        }
    }
}
