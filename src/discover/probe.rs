use futures::future::BoxFuture;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

/// Join a candidate label with the root domain.
pub fn join_hostname(label: &str, root: &str) -> String {
    format!("{}.{}", label, root)
}

/// Existence lookup behind the enumerator. Production code resolves DNS via
/// [`NameProbe`]; tests swap in a canned resolver so the worker pool can be
/// exercised hermetically.
pub trait HostResolver: Send + Sync + 'static {
    fn exists<'a>(&'a self, label: &'a str, root: &'a str) -> BoxFuture<'a, bool>;
}

/// DNS existence probe for candidate hostnames.
#[derive(Clone)]
pub struct NameProbe {
    resolver: TokioAsyncResolver,
}

impl NameProbe {
    /// Resolver from the system configuration, falling back to the library
    /// defaults (Google public DNS) when none can be read.
    pub fn new() -> Self {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|_| {
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });
        Self { resolver }
    }

    /// True when `label.root` has at least one A record. Any resolution
    /// failure (NXDOMAIN, timeout, server error) means "not confirmed" —
    /// a miss is conclusive for this run, so there are no retries.
    pub async fn exists(&self, label: &str, root: &str) -> bool {
        let hostname = join_hostname(label, root);
        match self.resolver.ipv4_lookup(hostname.as_str()).await {
            Ok(lookup) => lookup.iter().next().is_some(),
            Err(_) => false,
        }
    }
}

impl Default for NameProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl HostResolver for NameProbe {
    fn exists<'a>(&'a self, label: &'a str, root: &'a str) -> BoxFuture<'a, bool> {
        Box::pin(self.exists(label, root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_label_and_root() {
        assert_eq!(join_hostname("www", "example.com"), "www.example.com");
        assert_eq!(join_hostname("api-dev", "example.co.uk"), "api-dev.example.co.uk");
    }
}
