use clap::Parser;

#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable detailed debug logging (global)
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Enable verbose logging (global)
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Enumerate live subdomains of a root domain, then crawl every host
    Scan {
        /// Root domain to scan (e.g. example.com)
        domain: String,

        /// Path to candidate-label word list (one label per line)
        #[arg(short = 'l', long)]
        wordlist: String,

        /// Output directory
        #[arg(short = 'o', long, default_value = "./results")]
        out: String,

        /// Concurrent DNS probes
        #[arg(short = 'w', long, default_value_t = 10)]
        workers: usize,

        /// Hosts crawled in parallel (1 = strictly sequential)
        #[arg(long, default_value_t = 1)]
        hosts: usize,

        /// HTTP fetch timeout in seconds
        #[arg(long, default_value_t = 10_u64)]
        timeout: u64,

        /// Minimum delay between fetches to the same host, in milliseconds
        #[arg(long, default_value_t = 1000_u64)]
        delay_ms: u64,

        /// Page cap per host crawl (0 = unbounded)
        #[arg(long, default_value_t = 500)]
        max_pages: usize,
    },

    /// Crawl a single known host without subdomain enumeration
    Crawl {
        /// Hostname to crawl (e.g. login.example.com)
        host: String,

        /// Output directory
        #[arg(short = 'o', long, default_value = "./results")]
        out: String,

        /// HTTP fetch timeout in seconds
        #[arg(long, default_value_t = 10_u64)]
        timeout: u64,

        /// Minimum delay between fetches to the same host, in milliseconds
        #[arg(long, default_value_t = 1000_u64)]
        delay_ms: u64,

        /// Page cap for the crawl (0 = unbounded)
        #[arg(long, default_value_t = 500)]
        max_pages: usize,
    },
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
