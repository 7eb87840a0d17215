// Mon Oct 12 2026 - Alex

use crate::memory::process::{DEFAULT_PROC_ROOT, HANDLE_IDLE_TIMEOUT, REGION_CACHE_TTL};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_THREADS: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub threads: usize,
    pub proc_root: PathBuf,
    pub region_cache_ttl_ms: u64,
    pub handle_idle_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            proc_root: PathBuf::from(DEFAULT_PROC_ROOT),
            region_cache_ttl_ms: REGION_CACHE_TTL.as_millis() as u64,
            handle_idle_timeout_ms: HANDLE_IDLE_TIMEOUT.as_millis() as u64,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_proc_root(mut self, root: PathBuf) -> Self {
        self.proc_root = root;
        self
    }

    pub fn with_region_cache_ttl(mut self, ttl: Duration) -> Self {
        self.region_cache_ttl_ms = ttl.as_millis() as u64;
        self
    }

    pub fn with_handle_idle_timeout(mut self, timeout: Duration) -> Self {
        self.handle_idle_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn region_cache_ttl(&self) -> Duration {
        Duration::from_millis(self.region_cache_ttl_ms)
    }

    pub fn handle_idle_timeout(&self) -> Duration {
        Duration::from_millis(self.handle_idle_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.threads == 0 {
            return Err("threads must be greater than 0".to_string());
        }
        if self.handle_idle_timeout_ms == 0 {
            return Err("handle_idle_timeout_ms must be greater than 0".to_string());
        }
        if self.proc_root.as_os_str().is_empty() {
            return Err("proc_root must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.threads, 32);
        assert_eq!(config.proc_root, PathBuf::from("/proc"));
        assert_eq!(config.region_cache_ttl(), Duration::from_secs(10));
        assert_eq!(config.handle_idle_timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_threads() {
        assert!(Config::default().with_threads(0).validate().is_err());
    }

    #[test]
    fn test_from_json_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memscan.json");
        fs::write(&path, r#"{ "threads": 4, "proc_root": "/tmp/fakeproc" }"#).unwrap();

        let config = Config::from_json_file(&path).unwrap();
        assert_eq!(config.threads, 4);
        assert_eq!(config.proc_root, PathBuf::from("/tmp/fakeproc"));
        assert_eq!(config.region_cache_ttl_ms, 10_000);
    }
}
