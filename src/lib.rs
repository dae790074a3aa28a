pub mod classify;
pub mod config;
pub mod crawl;
pub mod discover;
pub mod output;
pub mod utils;

// re-export the types most callers need
pub use crate::classify::Classifier;
pub use crate::crawl::{CrawlEngine, CrawlStats};
pub use crate::discover::SubdomainEnumerator;
pub use crate::output::MatchSink;
