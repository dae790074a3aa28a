use std::fs;
use std::path::Path;

pub fn ensure_dir(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Read a candidate word list, one label per line. Blank lines are ignored.
pub fn load_wordlist(path: &Path) -> anyhow::Result<Vec<String>> {
    let data = fs::read_to_string(path)?;
    Ok(data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Generation stamp for output filenames so runs never collide.
pub fn run_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn wordlist_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subdomains.txt");
        let mut f = fs::File::create(&path).unwrap();
        write!(f, "www\n\n  \napi\n  mail  \n").unwrap();

        let labels = load_wordlist(&path).unwrap();
        assert_eq!(labels, vec!["www", "api", "mail"]);
    }

    #[test]
    fn timestamp_is_filename_safe() {
        let ts = run_timestamp();
        assert_eq!(ts.len(), 15);
        assert!(ts.chars().all(|c| c.is_ascii_digit() || c == '_'));
    }
}
