// Wed Oct 14 2026 - Alex

use crate::config::Config;
use crate::memory::{Pid, ProcessHandle};
use ahash::AHashMap;
use log::debug;

/// Worker-local process handles, one per pid.
pub struct ProcessCache {
    config: Config,
    handles: AHashMap<Pid, ProcessHandle>,
}

impl ProcessCache {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            handles: AHashMap::new(),
        }
    }

    pub fn get(&mut self, pid: Pid) -> &ProcessHandle {
        let config = &self.config;
        self.handles.entry(pid).or_insert_with(|| {
            debug!("Opening process handle for pid {}", pid);
            ProcessHandle::from_pid(pid, config)
        })
    }

    pub fn evict(&mut self, pid: Pid) -> bool {
        self.handles.remove(&pid).is_some()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_handle_per_pid() {
        let mut cache = ProcessCache::new(Config::default());
        assert!(cache.is_empty());

        let first = cache.get(10) as *const ProcessHandle;
        let again = cache.get(10) as *const ProcessHandle;
        assert_eq!(first, again);

        cache.get(11);
        assert_eq!(cache.len(), 2);
        assert!(cache.evict(10));
        assert!(!cache.evict(10));
        assert_eq!(cache.len(), 1);
    }
}
