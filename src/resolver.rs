use std::path::Path;

use crate::backend::{DirectFs, ProviderFs, SharedProvider};
use crate::vfs::{CacheFs, Node};

/// One storage root the resolver may probe, in priority order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageRoot {
    /// A volume mounted under the storage base, e.g. "emulated" or a
    /// removable card's name.
    Direct { volume: String },
    /// A granted document-tree handle, e.g. "primary:".
    Provider { tree: String },
}

/// A cache root that was actually found under some storage root.
pub struct ResolvedRoot {
    pub fs: Box<dyn CacheFs>,
    pub node: Node,
}

/// Probes `roots` in order and returns the first one that contains
/// `relative_path`, or `None` when no root does.
///
/// Probing stops at the first hit so overlapping grants never process the
/// same logical cache tree twice. A root that errors is skipped.
pub fn resolve_cache_root(
    storage_base: &Path,
    roots: &[StorageRoot],
    relative_path: &str,
    provider: Option<&SharedProvider>,
) -> Option<ResolvedRoot> {
    for root in roots {
        match root {
            StorageRoot::Direct { volume } => {
                // The primary volume mounts user 0's view one level down.
                let volume = match volume.as_str() {
                    "emulated" => "emulated/0",
                    other => other,
                };
                let path = storage_base.join(volume).join(relative_path);
                if let Some(node) = DirectFs::dir_node(&path) {
                    return Some(ResolvedRoot {
                        fs: Box::new(DirectFs),
                        node,
                    });
                }
            }
            StorageRoot::Provider { tree } => {
                let Some(provider) = provider else { continue };
                let fs = ProviderFs::new(provider.clone());
                let node = ProviderFs::dir_node(tree, relative_path);
                if !fs.list_children(&node).is_empty() {
                    return Some(ResolvedRoot {
                        fs: Box::new(fs),
                        node,
                    });
                }
            }
        }
    }
    None
}
