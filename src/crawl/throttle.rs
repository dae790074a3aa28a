use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::sleep;

/// Permit for one fetch; holding it keeps the global in-flight bound.
pub struct FetchPermit {
    _global: OwnedSemaphorePermit,
}

/// Politeness control: a global bound on fetches in flight plus a minimum
/// delay between consecutive fetches to the same host. The delay is a
/// scheduling policy, not a correctness guarantee.
pub struct Throttle {
    global: Arc<Semaphore>,
    last_fetch: DashMap<String, Instant>,
    min_delay: Duration,
}

impl Throttle {
    pub fn new(global_limit: usize, min_delay: Duration) -> Self {
        Self {
            global: Arc::new(Semaphore::new(global_limit.max(1))),
            last_fetch: DashMap::new(),
            min_delay,
        }
    }

    /// Wait until `host` is due another fetch, then take a permit.
    pub async fn acquire(&self, host: &str) -> FetchPermit {
        loop {
            let remaining = self
                .last_fetch
                .get(host)
                .map(|at| self.min_delay.saturating_sub(at.elapsed()));
            match remaining {
                Some(wait) if !wait.is_zero() => sleep(wait).await,
                _ => break,
            }
        }

        let permit = self
            .global
            .clone()
            .acquire_owned()
            .await
            .expect("throttle semaphore closed");
        self.last_fetch.insert(host.to_string(), Instant::now());
        FetchPermit { _global: permit }
    }
}
