pub mod probe;
pub mod subdomain;

pub use probe::{HostResolver, NameProbe};
pub use subdomain::SubdomainEnumerator;
