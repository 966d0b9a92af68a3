//! Run configuration: where storage roots come from and which app variants
//! are cleaned. Loaded once before a run; the run itself never mutates it.

use std::path::{Path, PathBuf};

use crate::engine::Target;
use crate::resolver::StorageRoot;

/// Mount point under which storage volumes appear.
pub const STORAGE_BASE: &str = "/storage";

const GRANTS_FILE: &str = "grants.txt";

/// The app variants whose shared caches this tool knows how to clean.
pub fn default_targets() -> Vec<Target> {
    vec![
        Target {
            label: "One Store".to_string(),
            relative_path: "Android/data/com.smartjoy.LastOrigin_C".to_string(),
            enabled: false,
        },
        Target {
            label: "Play Store".to_string(),
            relative_path: "Android/data/com.smartjoy.LastOrigin_G".to_string(),
            enabled: false,
        },
        Target {
            label: "Play Store (JP)".to_string(),
            relative_path: "Android/data/com.pig.laojp.aos".to_string(),
            enabled: false,
        },
    ]
}

/// Volume names found under the storage base. The `self` entry is the
/// base's own alias, never a real volume.
pub fn discover_volumes(base: &Path) -> Vec<String> {
    match std::fs::read_dir(base) {
        Ok(read_dir) => read_dir
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name != "self")
            .collect(),
        Err(e) => {
            tracing::debug!(base = %base.display(), error = %e, "no storage volumes found");
            vec![]
        }
    }
}

/// A usable tree grant names a volume root, i.e. ends at the volume
/// boundary ("primary:"). Anything deeper was granted too narrowly.
pub fn valid_tree_handle(handle: &str) -> bool {
    handle.len() > 1 && handle.ends_with(':')
}

/// Parses the newline-joined persisted grant list, dropping blank and
/// malformed entries.
pub fn parse_grants(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| valid_tree_handle(line))
        .map(str::to_string)
        .collect()
}

fn grants_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cachesweep").join(GRANTS_FILE))
}

/// Loads previously granted tree handles from the user config dir. The
/// file is written by whatever performs the grant flow; this tool only
/// reads it.
pub fn load_grants() -> Vec<String> {
    let Some(path) = grants_path() else {
        return vec![];
    };
    match std::fs::read_to_string(&path) {
        Ok(raw) => parse_grants(&raw),
        Err(_) => vec![],
    }
}

/// Roots in probe priority order: direct volumes first, then tree grants.
pub fn storage_roots(volumes: &[String], grants: &[String]) -> Vec<StorageRoot> {
    volumes
        .iter()
        .map(|v| StorageRoot::Direct { volume: v.clone() })
        .chain(grants.iter().map(|g| StorageRoot::Provider { tree: g.clone() }))
        .collect()
}
