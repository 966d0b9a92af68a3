use std::path::PathBuf;

use crate::backend::SharedProvider;
use crate::messages;
use crate::resolver::{self, StorageRoot};
use crate::retention;

/// Path of the shared download cache below each app variant's data dir.
pub const CACHE_SUBPATH: &str = "files/UnityCache/Shared/";

/// One app-variant cache tree, independently toggled for a run.
#[derive(Clone, Debug)]
pub struct Target {
    pub label: String,
    /// App data dir relative to a storage root, e.g. "Android/data/<pkg>".
    pub relative_path: String,
    pub enabled: bool,
}

impl Target {
    /// Relative path of this target's shared cache root.
    pub fn cache_path(&self) -> String {
        format!(
            "{}/{CACHE_SUBPATH}",
            self.relative_path.trim_end_matches('/')
        )
    }
}

/// Everything one reclamation run needs. Built before the run starts and
/// immutable for its duration.
pub struct RunConfig {
    pub storage_base: PathBuf,
    pub roots: Vec<StorageRoot>,
    pub targets: Vec<Target>,
    pub provider: Option<SharedProvider>,
}

/// Runs one reclamation pass over every enabled target, sequentially, and
/// returns the total number of bytes removed.
///
/// Every emitted event goes through `log`. Per-target and per-node failures
/// degrade to skip-and-continue; the run itself never aborts.
pub fn run(config: &RunConfig, log: &dyn Fn(String)) -> u64 {
    let mut total = 0u64;

    for target in config.targets.iter().filter(|t| t.enabled) {
        let cache_path = target.cache_path();
        match resolver::resolve_cache_root(
            &config.storage_base,
            &config.roots,
            &cache_path,
            config.provider.as_ref(),
        ) {
            Some(root) => {
                let removed = retention::clean_cache_root(root.fs.as_ref(), &root.node, log);
                log(messages::target_cleaned(&target.label, removed));
                total += removed;
            }
            None => log(messages::target_not_found(&target.label)),
        }
    }

    log(messages::all_cleaned(total));
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::FakeProvider;
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;
    use std::sync::Arc;

    const HEX40: &str = "00112233445566778899aabbccddeeff00112233";

    fn target(label: &str, pkg: &str, enabled: bool) -> Target {
        Target {
            label: label.to_string(),
            relative_path: format!("Android/data/{pkg}"),
            enabled,
        }
    }

    fn collecting_log() -> (Rc<RefCell<Vec<String>>>, impl Fn(String)) {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let lines = lines.clone();
            move |line: String| lines.borrow_mut().push(line)
        };
        (lines, sink)
    }

    fn set_mtime(path: &Path, millis: u64) {
        let time = std::time::UNIX_EPOCH + std::time::Duration::from_millis(millis);
        std::fs::File::open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    #[test]
    fn cache_path_appends_the_shared_cache_subtree() {
        let t = target("Play Store", "com.example.app", true);
        assert_eq!(
            t.cache_path(),
            "Android/data/com.example.app/files/UnityCache/Shared/"
        );
    }

    #[test]
    fn disabled_and_unresolved_targets_contribute_nothing() {
        let base = tempfile::tempdir().unwrap();
        let config = RunConfig {
            storage_base: base.path().to_path_buf(),
            roots: vec![StorageRoot::Direct {
                volume: "emulated".to_string(),
            }],
            targets: vec![
                target("Disabled", "com.example.off", false),
                target("Missing", "com.example.on", true),
            ],
            provider: None,
        };

        let (lines, sink) = collecting_log();
        let total = run(&config, &sink);

        assert_eq!(total, 0);
        assert_eq!(
            lines.borrow().as_slice(),
            [
                messages::target_not_found("Missing"),
                messages::all_cleaned(0),
            ]
        );
    }

    #[test]
    fn direct_run_reclaims_legacy_and_stale_versions() {
        let base = tempfile::tempdir().unwrap();
        let cache = base
            .path()
            .join("emulated/0/Android/data/com.example.app/files/UnityCache/Shared");

        let legacy = cache.join(HEX40);
        std::fs::create_dir_all(&legacy).unwrap();
        std::fs::write(legacy.join("a"), vec![0u8; 100]).unwrap();
        std::fs::write(legacy.join("b"), vec![0u8; 200]).unwrap();
        std::fs::write(legacy.join("c"), vec![0u8; 300]).unwrap();

        let assets = cache.join("GameAssets");
        for (name, size, ts) in [("v10", 50, 10u64), ("v20", 60, 20), ("v30", 70, 30)] {
            let version = assets.join(name);
            std::fs::create_dir_all(&version).unwrap();
            std::fs::write(version.join("data"), vec![0u8; size]).unwrap();
            set_mtime(&version, ts);
        }

        let config = RunConfig {
            storage_base: base.path().to_path_buf(),
            roots: vec![StorageRoot::Direct {
                volume: "emulated".to_string(),
            }],
            targets: vec![target("Play Store", "com.example.app", true)],
            provider: None,
        };

        let (lines, sink) = collecting_log();
        let total = run(&config, &sink);

        assert_eq!(total, 710);
        assert!(!legacy.exists());
        assert!(!assets.join("v10").exists());
        assert!(!assets.join("v20").exists());
        assert!(assets.join("v30").exists());

        let lines = lines.borrow();
        // Three removals in listing order, then the two summary lines.
        assert_eq!(lines.len(), 5);
        assert!(lines[..3].contains(&messages::directory_removed(HEX40, 600)));
        assert!(lines[..3].contains(&messages::directory_removed("GameAssets/v10", 50)));
        assert!(lines[..3].contains(&messages::directory_removed("GameAssets/v20", 60)));
        assert_eq!(lines[3], messages::target_cleaned("Play Store", 710));
        assert_eq!(lines[4], messages::all_cleaned(710));
    }

    #[test]
    fn totals_aggregate_across_targets_and_backends() {
        let base = tempfile::tempdir().unwrap();
        let cache = base
            .path()
            .join("card0/Android/data/com.example.direct/files/UnityCache/Shared");
        let legacy = cache.join(HEX40);
        std::fs::create_dir_all(&legacy).unwrap();
        std::fs::write(legacy.join("blob"), vec![0u8; 400]).unwrap();

        let fake = Arc::new(FakeProvider::new());
        let root_id = "primary:Android/data/com.example.saf/files/UnityCache/Shared/";
        let legacy24 = "0123456789abcdef01234567";
        let legacy_id = format!("{root_id}{legacy24}");
        fake.add_dir(root_id, &legacy_id, legacy24, 0);
        fake.add_file(&legacy_id, &format!("{legacy_id}/blob"), "blob", 300);

        let config = RunConfig {
            storage_base: base.path().to_path_buf(),
            roots: vec![
                StorageRoot::Direct {
                    volume: "card0".to_string(),
                },
                StorageRoot::Provider {
                    tree: "primary:".to_string(),
                },
            ],
            targets: vec![
                target("Direct variant", "com.example.direct", true),
                target("Provider variant", "com.example.saf", true),
            ],
            provider: Some(fake.clone()),
        };

        let (lines, sink) = collecting_log();
        let total = run(&config, &sink);

        assert_eq!(total, 700);
        assert_eq!(fake.deleted(), vec![legacy_id]);
        assert_eq!(
            lines.borrow().last().unwrap(),
            &messages::all_cleaned(700)
        );
    }
}
