// Tue Oct 13 2026 - Alex

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Access flags from the permission column of a maps line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Protection: u32 {
        const READ = 1;
        const WRITE = 2;
        const EXECUTE = 4;
        const SHARED = 8;
    }
}

impl Protection {
    /// Parses strings such as `rw-p` or `r-xs`. Unknown characters are ignored.
    pub fn from_perms(perms: &str) -> Self {
        let mut flags = Self::empty();
        for (i, c) in perms.chars().enumerate() {
            match (i, c) {
                (0, 'r') => flags |= Self::READ,
                (1, 'w') => flags |= Self::WRITE,
                (2, 'x') => flags |= Self::EXECUTE,
                (3, 's') => flags |= Self::SHARED,
                _ => {}
            }
        }
        flags
    }

    pub fn can_read(self) -> bool {
        self.contains(Self::READ)
    }

    pub fn can_write(self) -> bool {
        self.contains(Self::WRITE)
    }

    pub fn can_execute(self) -> bool {
        self.contains(Self::EXECUTE)
    }

    pub fn is_shared(self) -> bool {
        self.contains(Self::SHARED)
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            if self.can_read() { 'r' } else { '-' },
            if self.can_write() { 'w' } else { '-' },
            if self.can_execute() { 'x' } else { '-' },
            if self.is_shared() { 's' } else { 'p' },
        )
    }
}
