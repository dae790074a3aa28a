use std::collections::HashSet;
use std::sync::Arc;

use url::Url;

use crate::classify::Classifier;
use crate::crawl::extract::extract_links;
use crate::crawl::fetcher::PageFetcher;
use crate::crawl::throttle::Throttle;
use crate::output::sink::MatchSink;

/// Outcome counters for one host's crawl session. `fetched` counts every
/// fetch operation, successful or not, so it equals the size of the visited
/// set at session end.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrawlStats {
    pub fetched: usize,
    pub failed: usize,
    pub matched: usize,
    pub truncated: bool,
}

/// Per-host crawl state. URLs are kept in `Url::to_string()` canonical form
/// so `http://host` and `http://host/` cannot both be fetched.
/// Invariant: `visited` and `frontier` are disjoint at all times.
struct CrawlSession {
    frontier: HashSet<String>,
    visited: HashSet<String>,
}

impl CrawlSession {
    /// Seed with both the HTTPS and HTTP root of the host.
    fn seed(host: &str) -> Self {
        let frontier = ["https", "http"]
            .iter()
            .filter_map(|scheme| Url::parse(&format!("{}://{}", scheme, host)).ok())
            .map(|u| u.to_string())
            .collect();
        Self {
            frontier,
            visited: HashSet::new(),
        }
    }

    /// Take any pending URL; set semantics, no ordering promise.
    fn pop(&mut self) -> Option<String> {
        let url = self.frontier.iter().next().cloned()?;
        self.frontier.remove(&url);
        Some(url)
    }

    /// Queue a discovered link unless it was already fetched or queued.
    fn push(&mut self, url: &Url) {
        let url = url.to_string();
        if !self.visited.contains(&url) {
            self.frontier.insert(url);
        }
    }
}

/// Same-origin crawler. Drives fetch -> classify -> extract -> enqueue for
/// one host at a time until the frontier empties (or the page cap is hit).
pub struct CrawlEngine {
    fetcher: PageFetcher,
    classifier: Classifier,
    throttle: Arc<Throttle>,
    /// 0 = unbounded, the reference behavior.
    max_pages: usize,
}

impl CrawlEngine {
    pub fn new(
        fetcher: PageFetcher,
        classifier: Classifier,
        throttle: Arc<Throttle>,
        max_pages: usize,
    ) -> Self {
        Self {
            fetcher,
            classifier,
            throttle,
            max_pages,
        }
    }

    /// Crawl `host` to frontier exhaustion, appending every classified match
    /// to `sink` as it is found. Per-URL fetch failures are logged and
    /// absorbed; only a sink write error aborts the session, because a match
    /// that was found but not durably recorded is silent data loss.
    pub async fn crawl_host(&self, host: &str, sink: &MatchSink) -> anyhow::Result<CrawlStats> {
        let mut session = CrawlSession::seed(host);
        let mut stats = CrawlStats::default();
        tracing::info!(host, "starting crawl");

        while let Some(current) = session.pop() {
            if session.visited.contains(&current) {
                continue;
            }
            if self.max_pages != 0 && stats.fetched >= self.max_pages {
                stats.truncated = true;
                tracing::warn!(
                    host,
                    cap = self.max_pages,
                    pending = session.frontier.len() + 1,
                    "crawl truncated at page cap"
                );
                break;
            }

            let url = match Url::parse(&current) {
                Ok(u) => u,
                Err(e) => {
                    tracing::debug!(url = %current, error = %e, "dropping unparseable frontier entry");
                    session.visited.insert(current);
                    continue;
                }
            };

            let _permit = self.throttle.acquire(host).await;
            tracing::debug!(url = %current, "fetching");

            match self.fetcher.fetch(&url).await {
                Ok(page) => {
                    session.visited.insert(current.clone());
                    stats.fetched += 1;
                    tracing::debug!(url = %current, status = page.status, "fetched");

                    if self.classifier.is_match(&page.classification_text()) {
                        stats.matched += 1;
                        tracing::info!(url = %current, "found SMS verification page");
                        sink.append(&current)?;
                    }

                    for link in extract_links(&page.body, &page.url) {
                        session.push(&link);
                    }
                }
                Err(e) => {
                    // Visited anyway so it is not retried this session; a
                    // failed page is never expanded.
                    session.visited.insert(current.clone());
                    stats.fetched += 1;
                    stats.failed += 1;
                    tracing::warn!(url = %current, error = %e, "fetch failed");
                }
            }
        }

        tracing::info!(
            host,
            fetched = stats.fetched,
            matched = stats.matched,
            failed = stats.failed,
            truncated = stats.truncated,
            "crawl complete"
        );
        Ok(stats)
    }
}
