// Tue Oct 13 2026 - Alex

const BYTE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// `0x`-prefixed lowercase hex, zero padded to at least `padding` digits.
pub fn to_hex(value: u64, padding: usize) -> String {
    format!("0x{:0width$x}", value, width = padding)
}

/// Byte count rounded to the nearest whole unit, e.g. `76 MB`.
pub fn to_human(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Byte".to_string();
    }

    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < BYTE_UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }
    let value = (bytes as f64 / scale as f64).round();
    format!("{} {}", value, BYTE_UNITS[unit])
}

/// Classic 16 bytes per line dump, addresses starting at `base`.
pub fn hex_dump(bytes: &[u8], base: u64) -> String {
    let mut out = String::new();
    for (i, line) in bytes.chunks(16).enumerate() {
        let hex: Vec<String> = line.iter().map(|b| format!("{:02x}", b)).collect();
        let ascii: String = line
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
            .collect();
        out.push_str(&format!(
            "{}  {:<47}  {}\n",
            to_hex(base + (i * 16) as u64, 8),
            hex.join(" "),
            ascii
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(32, 2), "0x20");
        assert_eq!(to_hex(1, 2), "0x01");
        assert_eq!(to_hex(5072, 2), "0x13d0");
        assert_eq!(to_hex(0x7f, 8), "0x0000007f");
    }

    #[test]
    fn test_to_human() {
        assert_eq!(to_human(0), "0 Byte");
        assert_eq!(to_human(1), "1 Bytes");
        assert_eq!(to_human(1024 * 1024), "1 MB");
        assert_eq!(to_human(76 * 1024 * 1024), "76 MB");
        assert_eq!(to_human(1536), "2 KB");
    }

    #[test]
    fn test_hex_dump() {
        let dump = hex_dump(b"memscan!\x00\x01", 0x1000);
        assert_eq!(dump.lines().count(), 1);
        assert!(dump.starts_with("0x00001000  6d 65 6d"));
        assert!(dump.trim_end().ends_with("memscan!.."));

        assert_eq!(hex_dump(&[0u8; 17], 0).lines().count(), 2);
        assert!(hex_dump(&[], 0).is_empty());
    }
}
