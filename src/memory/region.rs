// Tue Oct 13 2026 - Alex

use crate::memory::Protection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Path markers of mappings that are never worth scanning: GPU device nodes
/// and anonymous memfd mappings.
const EXCLUDED_MARKERS: [&str; 2] = ["/dev/nvidia", "/memfd:"];

/// One line of `/proc/<pid>/maps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRegion {
    start: u64,
    end: u64,
    permissions: String,
    path: Option<String>,
    line: String,
}

impl MemoryRegion {
    pub fn new(start: u64, end: u64, permissions: &str) -> Self {
        Self {
            start,
            end,
            permissions: permissions.to_string(),
            path: None,
            line: format!("{:x}-{:x} {} 00000000 00:00 0", start, end, permissions),
        }
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.line = format!("{} {}", self.line, path);
        self.path = Some(path.to_string());
        self
    }

    /// Parses `start-end perms offset dev inode [path]`.
    ///
    /// Returns `None` for lines that do not follow that layout or describe an
    /// empty or inverted range.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let (start, end) = parts.next()?.split_once('-')?;
        let start = u64::from_str_radix(start, 16).ok()?;
        let end = u64::from_str_radix(end, 16).ok()?;
        if start >= end {
            return None;
        }

        let permissions = parts.next()?.to_string();
        // offset, dev, inode
        for _ in 0..3 {
            parts.next()?;
        }

        let path: Vec<&str> = parts.collect();
        let path = if path.is_empty() {
            None
        } else {
            Some(path.join(" "))
        };

        Some(Self {
            start,
            end,
            permissions,
            path,
            line: line.to_string(),
        })
    }

    /// Writable and not backed by a known noise source.
    pub fn is_scannable(&self) -> bool {
        self.permissions.starts_with("rw")
            && !EXCLUDED_MARKERS.iter().any(|marker| self.line.contains(marker))
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn size(&self) -> u64 {
        self.end - self.start
    }

    pub fn permissions(&self) -> &str {
        &self.permissions
    }

    pub fn protection(&self) -> Protection {
        Protection::from_perms(&self.permissions)
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    /// Half-open containment, `start <= addr < end`.
    pub fn contains(&self, addr: u64) -> bool {
        addr >= self.start && addr < self.end
    }

    /// Strict containment on both ends, `start < addr < end`.
    pub fn contains_strictly(&self, addr: u64) -> bool {
        addr > self.start && addr < self.end
    }
}

impl fmt::Display for MemoryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}-0x{:x} {}", self.start, self.end, self.permissions)?;
        if let Some(path) = &self.path {
            write!(f, " {}", path)?;
        }
        Ok(())
    }
}
