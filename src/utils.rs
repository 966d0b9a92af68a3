use std::path::Path;
use walkdir::WalkDir;

/// Compute total size of a directory recursively.
pub fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

/// Format a byte count the way the cache cleaner has always reported it:
/// divide by 1024 while the running value is at least 1000, then pick the
/// unit from the division count. Any count outside 1..=4 prints the raw
/// byte count instead, quirks included, so log output stays comparable
/// across releases.
pub fn size_readable(size: u64) -> String {
    let mut value = size as f32;
    let mut step = 0;
    while value >= 1000.0 {
        value /= 1024.0;
        step += 1;
    }

    match step {
        1 => format!("{value}KBs"),
        2 => format!("{value}MBs"),
        3 => format!("{value}GBs"),
        4 => format!("{value}PBs"),
        _ => format!("{size}bytes"),
    }
}
