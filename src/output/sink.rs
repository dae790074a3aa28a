use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

/// Append-only sink for matched URLs, one URL per line. Each append is a
/// single whole-line write under a lock, so hosts crawled in parallel never
/// interleave partial lines, and the file is flushed before the caller
/// proceeds — a recorded match survives a later crash of the session.
pub struct MatchSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl MatchSink {
    pub fn create(path: &Path) -> anyhow::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, url: &str) -> anyhow::Result<()> {
        let line = format!("{}\n", url);
        let mut file = self.file.lock();
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

/// Write the confirmed-subdomain artifact, one hostname per line. Sorted
/// for stable output; the set itself carries no order.
pub fn write_subdomains(path: &Path, subdomains: &HashSet<String>) -> anyhow::Result<()> {
    let mut hosts: Vec<&str> = subdomains.iter().map(String::as_str).collect();
    hosts.sort_unstable();

    let mut body = hosts.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    std::fs::write(path, body)?;
    Ok(())
}
