pub mod sink;

pub use sink::write_subdomains;
pub use sink::MatchSink;
