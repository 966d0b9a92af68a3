use std::path::Path;
use std::time::UNIX_EPOCH;

use crate::utils;
use crate::vfs::{CacheFs, Node, NodeId};

/// Name length of a legacy cache directory under the path-based naming
/// convention (hex digest of the older hashing scheme).
const LEGACY_NAME_LEN: usize = 40;

/// Plain hierarchical path access to a storage volume.
pub struct DirectFs;

impl DirectFs {
    /// Builds a directory node for `path`, or `None` when no directory
    /// exists there.
    pub fn dir_node(path: &Path) -> Option<Node> {
        if !path.is_dir() {
            return None;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Some(Node {
            id: NodeId::Path(path.to_path_buf()),
            name,
            is_dir: true,
            size: 0,
            last_modified: 0,
            can_write: true,
        })
    }

    fn node_from_entry(entry: std::fs::DirEntry) -> Option<Node> {
        let meta = entry.metadata().ok()?;
        let last_modified = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);

        Some(Node {
            id: NodeId::Path(entry.path()),
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: meta.is_dir(),
            size: if meta.is_file() { meta.len() } else { 0 },
            last_modified,
            can_write: !meta.permissions().readonly(),
        })
    }
}

impl CacheFs for DirectFs {
    fn list_children(&self, node: &Node) -> Vec<Node> {
        let path = match &node.id {
            NodeId::Path(path) => path,
            NodeId::Document(_) => return vec![],
        };

        match std::fs::read_dir(path) {
            Ok(read_dir) => read_dir
                .flatten()
                .filter_map(Self::node_from_entry)
                .collect(),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "listing failed, treating as empty");
                vec![]
            }
        }
    }

    fn delete_recursive(&self, node: &Node) {
        let path = match &node.id {
            NodeId::Path(path) => path,
            NodeId::Document(_) => return,
        };

        let result = if node.is_dir {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        };
        if let Err(e) = result {
            tracing::warn!(path = %path.display(), error = %e, "delete failed");
        }
    }

    fn legacy_name_len(&self) -> usize {
        LEGACY_NAME_LEN
    }

    fn recursive_size(&self, node: &Node) -> u64 {
        match &node.id {
            NodeId::Path(path) if node.is_dir => utils::dir_size(path),
            _ => node.size,
        }
    }
}
