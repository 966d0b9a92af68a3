use std::sync::OnceLock;

use regex::Regex;

use crate::messages;
use crate::vfs::{CacheFs, Node};

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("^[0-9a-f]+$").expect("hex pattern compiles"))
}

/// A legacy cache directory is named by a fixed-length all-lowercase hex
/// digest; the expected length depends on the backend's naming convention.
fn is_legacy_name(name: &str, expected_len: usize) -> bool {
    name.len() == expected_len && hex_pattern().is_match(name)
}

/// Removes stale entries under one resolved cache root and returns the
/// number of bytes reclaimed, emitting one log line per removed directory.
///
/// Each immediate subdirectory is either a legacy-format cache (removed
/// outright) or a container of per-build-version snapshots, of which only
/// the most recently modified one is kept. Sizes are measured before the
/// delete; a delete that fails afterwards is not re-checked.
pub fn clean_cache_root(fs: &dyn CacheFs, root: &Node, log: &dyn Fn(String)) -> u64 {
    let mut removed = 0u64;

    for target in fs.list_children(root) {
        if !target.is_dir {
            continue;
        }

        if is_legacy_name(&target.name, fs.legacy_name_len()) {
            let size = fs.recursive_size(&target);
            removed += size;
            fs.delete_recursive(&target);
            log(messages::directory_removed(&target.name, size));
            continue;
        }

        // Per-build-version snapshots. A single version is always kept, and
        // an empty or unreadable target is left alone.
        let versions = fs.list_children(&target);
        if versions.len() <= 1 {
            continue;
        }

        let mut keep = 0;
        for (i, version) in versions.iter().enumerate() {
            if version.last_modified > versions[keep].last_modified {
                keep = i;
            }
        }

        for (i, version) in versions.iter().enumerate() {
            if i == keep {
                continue;
            }
            let size = fs.recursive_size(version);
            removed += size;
            fs.delete_recursive(version);
            log(messages::directory_removed(
                &format!("{}/{}", target.name, version.name),
                size,
            ));
        }
    }

    removed
}
