// Tue Oct 13 2026 - Alex

pub mod format;
pub mod logging;

pub use format::{hex_dump, to_hex, to_human};
pub use logging::{init_from_env, init_logger, ScopedTimer};
