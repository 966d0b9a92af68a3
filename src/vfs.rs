use std::path::PathBuf;

/// Backend-specific identity of one storage entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeId {
    /// Canonical path on a directly accessible volume.
    Path(PathBuf),
    /// Document id resolved through the provider protocol.
    Document(String),
}

/// One filesystem or document entry as reported by a listing call.
///
/// Nodes are produced fresh by each listing and are only valid until the
/// underlying entry may have been deleted; handles are never reused across
/// a delete.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub is_dir: bool,
    /// Reported size in bytes. Meaningful for files only; 0 for directories.
    pub size: u64,
    /// Last modification time, epoch millis.
    pub last_modified: i64,
    pub can_write: bool,
}

/// The trait every storage backend implements.
pub trait CacheFs {
    /// Lists immediate children of a directory node.
    ///
    /// An unreadable, missing, or non-directory node yields an empty list;
    /// callers treat "empty" and "does not exist" identically.
    fn list_children(&self, node: &Node) -> Vec<Node>;

    /// Deletes the node and everything beneath it, best effort. Partial
    /// deletion on failure is not detected and never retried.
    fn delete_recursive(&self, node: &Node);

    /// Name length of a legacy-format cache directory under this backend's
    /// naming convention (the two historical hashing schemes differ).
    fn legacy_name_len(&self) -> usize;

    /// Total size in bytes of all files at or under `node`. An empty or
    /// unreadable directory contributes 0.
    fn recursive_size(&self, node: &Node) -> u64 {
        if !node.is_dir {
            return node.size;
        }
        self.list_children(node)
            .iter()
            .map(|child| self.recursive_size(child))
            .sum()
    }
}
