use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::cli::{Cli, Commands};
use sms_hunter::config::ScanConfig;
use sms_hunter::crawl::{PageFetcher, Throttle};
use sms_hunter::output::sink::write_subdomains;
use sms_hunter::{Classifier, CrawlEngine, CrawlStats, MatchSink, SubdomainEnumerator};

fn print_ascii_logo() {
    println!(
        r#"
         ____  __  __ ____    _   _ _   _ _   _ _____ _____ ____
        / ___||  \/  / ___|  | | | | | | | \ | |_   _| ____|  _ \
        \___ \| |\/| \___ \  | |_| | | | |  \| | | | |  _| | |_) |
         ___) | |  | |___) | |  _  | |_| | |\  | | | | |___|  _ <
        |____/|_|  |_|____/  |_| |_|\___/|_| \_| |_| |_____|_| \_\

                   SMS Verification Page Finder v0.1.0
    "#
    );
}

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    // Configure logging based on global flags. Keep external crates
    // (reqwest/hyper/hickory) at INFO to avoid flooding the CLI.
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    let filter_str = format!(
        "sms_hunter={crate},reqwest=info,hyper=info,hickory_resolver=info,hickory_proto=info",
        crate = crate_level
    );
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(true)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Scan {
            domain,
            wordlist,
            out,
            workers,
            hosts,
            timeout,
            delay_ms,
            max_pages,
        } => {
            let config = ScanConfig {
                workers,
                hosts,
                timeout_secs: timeout,
                delay_ms,
                max_pages,
            };
            run_scan(domain, wordlist, out, config).await
        }
        Commands::Crawl {
            host,
            out,
            timeout,
            delay_ms,
            max_pages,
        } => {
            let config = ScanConfig {
                hosts: 1,
                timeout_secs: timeout,
                delay_ms,
                max_pages,
                ..ScanConfig::default()
            };
            run_single_crawl(host, out, config).await
        }
    }
}

async fn run_scan(
    domain: String,
    wordlist: String,
    out: String,
    config: ScanConfig,
) -> anyhow::Result<()> {
    let out_dir = PathBuf::from(&out);
    sms_hunter::utils::ensure_dir(&out_dir)?;
    let stamp = sms_hunter::utils::run_timestamp();

    // Normalize a full URL target down to its host, so `https://example.com`
    // and `example.com` behave the same.
    let domain = if domain.starts_with("http://") || domain.starts_with("https://") {
        match url::Url::parse(&domain) {
            Ok(u) => u.host_str().map(|s| s.to_string()).unwrap_or(domain.clone()),
            Err(_) => domain.clone(),
        }
    } else {
        domain
    };

    tracing::info!(
        target = %domain,
        out = %out,
        workers = config.workers,
        hosts = config.hosts,
        timeout = config.timeout_secs,
        delay_ms = config.delay_ms,
        max_pages = config.max_pages,
        "Starting scan"
    );

    print_ascii_logo();
    println!("[>] Target: {}", domain);
    println!(
        "[~] DNS workers: {} | host concurrency: {} | page cap: {}",
        config.workers, config.hosts, config.max_pages
    );
    println!("\n{}\n", "-".repeat(60));

    // Phase 1: Subdomain enumeration
    let labels = sms_hunter::utils::load_wordlist(Path::new(&wordlist))?;
    println!("[*] Subdomain enumeration ({} candidates)...", labels.len());

    let enumerator = SubdomainEnumerator::new(config.workers);
    let confirmed = enumerator.enumerate(&domain, &labels).await;

    let subdomain_path = out_dir.join(format!("subdomains_{}.txt", stamp));
    write_subdomains(&subdomain_path, &confirmed)?;
    println!(
        "   Found: {} subdomains -> {}",
        confirmed.len(),
        subdomain_path.display()
    );

    if confirmed.is_empty() {
        println!("\n[=] No live subdomains; nothing to crawl.");
        return Ok(());
    }

    // Phase 2: Same-origin crawl of every confirmed host
    let match_path = out_dir.join(format!("sms_pages_{}.txt", stamp));
    let mut targets: Vec<String> = confirmed.into_iter().collect();
    targets.sort_unstable();

    crawl_hosts(targets, &match_path, &config).await
}

async fn run_single_crawl(host: String, out: String, config: ScanConfig) -> anyhow::Result<()> {
    let out_dir = PathBuf::from(&out);
    sms_hunter::utils::ensure_dir(&out_dir)?;
    let stamp = sms_hunter::utils::run_timestamp();

    print_ascii_logo();
    println!("[>] Target host: {}", host);
    println!("\n{}\n", "-".repeat(60));

    let match_path = out_dir.join(format!("sms_pages_{}.txt", stamp));
    crawl_hosts(vec![host], &match_path, &config).await
}

/// Crawl the given hosts, up to `config.hosts` in parallel. Sessions are
/// fully independent; the only shared resource is the match sink. Per-host
/// fetch failures never abort other hosts — the single fatal path is a sink
/// write error, which would silently lose matches if swallowed.
async fn crawl_hosts(
    targets: Vec<String>,
    match_path: &Path,
    config: &ScanConfig,
) -> anyhow::Result<()> {
    let host_concurrency = config.hosts.max(1);
    let sink = Arc::new(MatchSink::create(match_path)?);
    let throttle = Arc::new(Throttle::new(
        host_concurrency,
        Duration::from_millis(config.delay_ms),
    ));
    let engine = Arc::new(CrawlEngine::new(
        PageFetcher::new(config.timeout_secs),
        Classifier::default(),
        throttle,
        config.max_pages,
    ));

    let total_hosts = targets.len();
    println!("[*] Crawling {} host(s)...", total_hosts);

    let results: Vec<(String, anyhow::Result<CrawlStats>)> = stream::iter(targets.into_iter())
        .map(|host| {
            let engine = engine.clone();
            let sink = sink.clone();
            async move {
                let res = engine.crawl_host(&host, &sink).await;
                (host, res)
            }
        })
        .buffer_unordered(host_concurrency)
        .collect()
        .await;

    let mut fetched = 0usize;
    let mut failed = 0usize;
    let mut matched = 0usize;
    let mut truncated = 0usize;
    for (host, res) in results {
        let stats = res.map_err(|e| e.context(format!("crawl of {} lost a match record", host)))?;
        fetched += stats.fetched;
        failed += stats.failed;
        matched += stats.matched;
        if stats.truncated {
            truncated += 1;
            println!("   [!] {} truncated at page cap", host);
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("[*] Scan Summary");
    println!("{}", "=".repeat(60));
    println!("[+] Hosts crawled: {}", total_hosts);
    println!("[+] Pages fetched: {} ({} failed)", fetched, failed);
    println!("[+] SMS verification pages: {}", matched);
    if truncated > 0 {
        println!("[!] Truncated hosts: {}", truncated);
    }
    println!("\n[=] Matches saved to: {}", match_path.display());
    println!();

    Ok(())
}
