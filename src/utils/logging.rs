// Tue Oct 13 2026 - Alex

use log::LevelFilter;
use std::time::Instant;

pub const DEFAULT_FILTER: &str = "info";

pub fn level_from_str(s: &str) -> LevelFilter {
    match s.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Installs env_logger at `level`, letting `RUST_LOG` override it.
pub fn init_logger(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_timestamp(None);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // a second init (tests, embedding) keeps the first logger
    let _ = builder.try_init();
}

/// Installs env_logger from `RUST_LOG`, defaulting to `info`.
pub fn init_from_env() {
    let env = env_logger::Env::default().default_filter_or(DEFAULT_FILTER);
    let _ = env_logger::Builder::from_env(env).format_timestamp(None).try_init();
}

/// Logs how long a scope took at debug level.
pub struct ScopedTimer {
    name: String,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        log::debug!("[TIMER] {} started", name);
        Self {
            name,
            start: Instant::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        log::debug!("[TIMER] {} took {:.2}ms", self.name, elapsed.as_secs_f64() * 1000.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(level_from_str("DEBUG"), LevelFilter::Debug);
        assert_eq!(level_from_str("warning"), LevelFilter::Warn);
        assert_eq!(level_from_str("nonsense"), LevelFilter::Info);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logger(LevelFilter::Debug);
        init_from_env();
        let timer = ScopedTimer::new("noop");
        assert_eq!(timer.name(), "noop");
    }
}
