use serde::Deserialize;

/// Knobs for one scan run. Defaults mirror the tool's invocation defaults:
/// 10 DNS probes in flight, one host crawled at a time, a 10s fetch timeout
/// and a 1s politeness delay, with a 500-page safety cap per host.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    pub workers: usize,
    pub hosts: usize,
    pub timeout_secs: u64,
    pub delay_ms: u64,
    /// 0 disables the cap.
    pub max_pages: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            hosts: 1,
            timeout_secs: 10,
            delay_ms: 1000,
            max_pages: 500,
        }
    }
}
