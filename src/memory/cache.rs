// Tue Oct 13 2026 - Alex

use crate::memory::MemoryError;
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Lazily computed, time-bounded value with single-flight refresh.
///
/// While a refresh is running every other caller blocks on it and receives
/// its outcome, success or failure. Failures are never cached.
pub struct TtlCache<T> {
    ttl: Duration,
    state: Mutex<CacheState<T>>,
    refreshed: Condvar,
}

struct CacheState<T> {
    entry: Option<CacheEntry<T>>,
    in_flight: bool,
    generation: u64,
    last_outcome: Option<Result<Arc<T>, MemoryError>>,
}

struct CacheEntry<T> {
    value: Arc<T>,
    computed_at: Instant,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: Mutex::new(CacheState {
                entry: None,
                in_flight: false,
                generation: 0,
                last_outcome: None,
            }),
            refreshed: Condvar::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value if it is still fresh, otherwise computes it
    /// once with `compute` and shares the result.
    pub fn get_or_refresh<F>(&self, compute: F) -> Result<Arc<T>, MemoryError>
    where
        F: FnOnce() -> Result<T, MemoryError>,
    {
        let mut state = self.state.lock();

        if let Some(value) = self.fresh(&state) {
            return Ok(value);
        }

        if state.in_flight {
            let target = state.generation + 1;
            while state.generation < target {
                self.refreshed.wait(&mut state);
            }
            if let Some(outcome) = &state.last_outcome {
                return outcome.clone();
            }
        }

        state.in_flight = true;
        let outcome = MutexGuard::unlocked(&mut state, compute).map(Arc::new);

        state.in_flight = false;
        state.generation += 1;
        if let Ok(value) = &outcome {
            state.entry = Some(CacheEntry {
                value: value.clone(),
                computed_at: Instant::now(),
            });
        }
        state.last_outcome = Some(outcome.clone());
        self.refreshed.notify_all();

        outcome
    }

    /// The cached value if it has not expired yet.
    pub fn peek(&self) -> Option<Arc<T>> {
        let state = self.state.lock();
        self.fresh(&state)
    }

    pub fn invalidate(&self) {
        self.state.lock().entry = None;
    }

    fn fresh(&self, state: &CacheState<T>) -> Option<Arc<T>> {
        state
            .entry
            .as_ref()
            .filter(|entry| entry.computed_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn test_value_is_reused_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(10));
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_refresh(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![1u8, 2, 3])
            })
            .unwrap();
        let second = cache
            .get_or_refresh(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![9u8])
            })
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_expired_value_is_recomputed() {
        let cache = TtlCache::new(Duration::from_millis(0));
        let first = cache.get_or_refresh(|| Ok(1u32)).unwrap();
        let second = cache.get_or_refresh(|| Ok(2u32)).unwrap();

        assert_eq!(*first, 1);
        assert_eq!(*second, 2);
        assert!(cache.peek().is_none());
    }

    #[test]
    fn test_failure_is_not_cached() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(10));
        let err = cache
            .get_or_refresh(|| Err(MemoryError::unavailable("/proc/1/maps", io::Error::from(io::ErrorKind::NotFound))))
            .unwrap_err();
        assert!(matches!(err, MemoryError::ResourceUnavailable { .. }));

        let value = cache.get_or_refresh(|| Ok(7)).unwrap();
        assert_eq!(*value, 7);
    }

    #[test]
    fn test_concurrent_callers_share_one_refresh() {
        let cache = Arc::new(TtlCache::new(Duration::from_secs(10)));
        let calls = Arc::new(AtomicUsize::new(0));
        let (started_tx, started_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();

        let leader = {
            let cache = cache.clone();
            let calls = calls.clone();
            thread::spawn(move || {
                cache
                    .get_or_refresh(|| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        started_tx.send(()).unwrap();
                        release_rx.recv().unwrap();
                        Ok(42u64)
                    })
                    .unwrap()
            })
        };

        started_rx.recv().unwrap();

        let followers: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                let calls = calls.clone();
                thread::spawn(move || {
                    cache
                        .get_or_refresh(|| {
                            calls.fetch_add(1, Ordering::SeqCst);
                            Ok(0u64)
                        })
                        .unwrap()
                })
            })
            .collect();

        thread::sleep(Duration::from_millis(50));
        release_tx.send(()).unwrap();

        let leader_value = leader.join().unwrap();
        for follower in followers {
            let value = follower.join().unwrap();
            assert!(Arc::ptr_eq(&leader_value, &value));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
