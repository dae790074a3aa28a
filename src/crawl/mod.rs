pub mod engine;
pub mod extract;
pub mod fetcher;
pub mod throttle;

pub use engine::{CrawlEngine, CrawlStats};
pub use fetcher::{FetchError, Page, PageFetcher};
pub use throttle::Throttle;
