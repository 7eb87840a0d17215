// Wed Oct 14 2026 - Alex

use crate::pattern::{Pattern, PatternError};

/// Little-endian bytes of a 32-bit unsigned value.
pub fn encode_lu32(value: i64) -> Result<[u8; 4], PatternError> {
    if value < 0 {
        return Err(PatternError::Underflow(value));
    }
    let value = u32::try_from(value).map_err(|_| PatternError::Overflow(value))?;
    Ok(value.to_le_bytes())
}

/// Eight byte pointer fragment.
///
/// Values that fit in 32 bits are written as four little-endian bytes followed
/// by four zero bytes; larger values as the full 64-bit little-endian value.
pub fn encode_pointer(value: u64) -> [u8; 8] {
    let mut out = [0u8; 8];
    match u32::try_from(value) {
        Ok(low) => out[..4].copy_from_slice(&low.to_le_bytes()),
        Err(_) => out.copy_from_slice(&value.to_le_bytes()),
    }
    out
}

/// Builds search patterns from literal values.
#[derive(Debug, Clone, Default)]
pub struct PatternBuilder {
    text: Vec<String>,
}

impl PatternBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.text.extend(bytes.iter().map(|b| format!("{:02x}", b)));
        self
    }

    pub fn wildcards(mut self, count: usize) -> Self {
        self.text.extend(std::iter::repeat("??".to_string()).take(count));
        self
    }

    pub fn lu32(self, value: i64) -> Result<Self, PatternError> {
        let bytes = encode_lu32(value)?;
        Ok(self.bytes(&bytes))
    }

    pub fn pointer(self, value: u64) -> Self {
        self.bytes(&encode_pointer(value))
    }

    pub fn to_text(&self) -> String {
        self.text.join(" ")
    }

    pub fn build(self) -> Result<Pattern, PatternError> {
        Pattern::compile(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_lu32() {
        assert_eq!(encode_lu32(0x5c45_41f0).unwrap(), [0xf0, 0x41, 0x45, 0x5c]);
        assert_eq!(encode_lu32(0xffff_ffff).unwrap(), [0xff; 4]);
        assert_eq!(encode_lu32(0).unwrap(), [0; 4]);
    }

    #[test]
    fn test_encode_lu32_overflow() {
        assert_eq!(encode_lu32(0x7f_5c45_41f0), Err(PatternError::Overflow(0x7f_5c45_41f0)));
        assert_eq!(encode_lu32(1 << 32), Err(PatternError::Overflow(1 << 32)));
    }

    #[test]
    fn test_encode_lu32_underflow() {
        assert_eq!(encode_lu32(-1), Err(PatternError::Underflow(-1)));
    }

    #[test]
    fn test_encode_pointer() {
        assert_eq!(encode_pointer(0x5c45_41f0), [0xf0, 0x41, 0x45, 0x5c, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(encode_pointer(0x7f_5c45_41f0), [0xf0, 0x41, 0x45, 0x5c, 0x7f, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_builder_text() {
        let builder = PatternBuilder::new().lu32(0x5c45_41f0).unwrap();
        assert_eq!(builder.to_text(), "f0 41 45 5c");

        let builder = PatternBuilder::new().pointer(0x5c45_41f0);
        assert_eq!(builder.to_text(), "f0 41 45 5c 00 00 00 00");

        let pattern = PatternBuilder::new()
            .lu32(0x5c45_41f0)
            .unwrap()
            .wildcards(4)
            .build()
            .unwrap();
        assert_eq!(pattern.to_string(), "f0 41 45 5c ?? ?? ?? ??");
    }

    #[test]
    fn test_empty_builder_fails() {
        assert_eq!(PatternBuilder::new().build(), Err(PatternError::Empty));
    }
}
