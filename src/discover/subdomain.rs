use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::discover::probe::{join_hostname, HostResolver, NameProbe};

/// Word-list subdomain enumeration: every candidate label is probed against
/// the root domain, at most `workers` lookups in flight.
pub struct SubdomainEnumerator<R = NameProbe> {
    probe: Arc<R>,
    workers: usize,
}

impl SubdomainEnumerator<NameProbe> {
    pub fn new(workers: usize) -> Self {
        Self::with_probe(NameProbe::new(), workers)
    }
}

impl<R: HostResolver> SubdomainEnumerator<R> {
    pub fn with_probe(probe: R, workers: usize) -> Self {
        Self {
            probe: Arc::new(probe),
            workers: workers.max(1),
        }
    }

    /// Probe all candidates and return the confirmed hostnames. Misses just
    /// drop out of the set; the call returns only after every probe has
    /// completed, success or failure.
    pub async fn enumerate(&self, root: &str, labels: &[String]) -> HashSet<String> {
        let limit = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();

        tracing::debug!("probing {} candidate labels against {}", labels.len(), root);

        for label in labels {
            let probe = Arc::clone(&self.probe);
            let limit = limit.clone();
            let label = label.clone();
            let root = root.to_string();

            tasks.spawn(async move {
                let _permit = limit.acquire_owned().await.expect("probe semaphore closed");
                if probe.exists(&label, &root).await {
                    Some(join_hostname(&label, &root))
                } else {
                    None
                }
            });
        }

        // Collecting through join_next keeps the result set single-owner:
        // workers never touch it, so inserts cannot race or get lost.
        let mut confirmed = HashSet::new();
        while let Some(result) = tasks.join_next().await {
            if let Ok(Some(hostname)) = result {
                tracing::info!(host = %hostname, "confirmed subdomain");
                confirmed.insert(hostname);
            }
        }

        tracing::info!("DNS bruteforce confirmed {} subdomains", confirmed.len());
        confirmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use futures::future::BoxFuture;

    /// Resolver with a fixed answer sheet, plus bookkeeping for how many
    /// lookups ran at once.
    struct CannedResolver {
        live: HashSet<String>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl CannedResolver {
        fn new(live: &[&str]) -> Self {
            Self {
                live: live.iter().map(|s| s.to_string()).collect(),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }
    }

    impl HostResolver for CannedResolver {
        fn exists<'a>(&'a self, label: &'a str, root: &'a str) -> BoxFuture<'a, bool> {
            Box::pin(async move {
                let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.max_in_flight.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                self.live.contains(&join_hostname(label, root))
            })
        }
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn confirms_exactly_the_resolving_candidates() {
        let enumerator = SubdomainEnumerator::with_probe(
            CannedResolver::new(&["www.example.com", "api.example.com"]),
            10,
        );
        let confirmed = enumerator
            .enumerate("example.com", &labels(&["www", "api", "blah-not-real-xyz"]))
            .await;

        let expected: HashSet<String> = ["www.example.com", "api.example.com"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(confirmed, expected);
    }

    #[tokio::test]
    async fn duplicate_labels_confirm_once() {
        let enumerator =
            SubdomainEnumerator::with_probe(CannedResolver::new(&["www.example.com"]), 10);
        let confirmed = enumerator
            .enumerate("example.com", &labels(&["www", "www", "www"]))
            .await;
        assert_eq!(confirmed.len(), 1);
    }

    #[tokio::test]
    async fn probes_in_flight_never_exceed_the_worker_count() {
        let candidates: Vec<String> = (0..20).map(|i| format!("host{}", i)).collect();
        let enumerator = SubdomainEnumerator::with_probe(CannedResolver::new(&[]), 3);

        let confirmed = enumerator.enumerate("example.com", &candidates).await;

        assert!(confirmed.is_empty());
        assert!(enumerator.probe.max_in_flight.load(Ordering::SeqCst) <= 3);
    }
}
