use std::sync::Arc;

use thiserror::Error;

use crate::vfs::{CacheFs, Node, NodeId};

/// MIME type a provider reports for directory rows.
pub const MIME_DIRECTORY: &str = "vnd.android.document/directory";

/// Flag bits set when a document supports delete/write operations.
pub const FLAG_SUPPORTS_DELETE: u32 = 0x0E;

/// Name length of a legacy cache directory under the provider naming
/// convention (hex digest of the newer hashing scheme).
const LEGACY_NAME_LEN: usize = 24;

/// One row of a child-listing query.
#[derive(Clone, Debug)]
pub struct DocumentRow {
    pub document_id: String,
    pub display_name: String,
    pub size: u64,
    pub last_modified: i64,
    pub mime_type: String,
    pub flags: u32,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("permission denied for document: {0}")]
    PermissionDenied(String),
    #[error("provider query failed: {0}")]
    Query(String),
}

/// The document-provider protocol. These are the only two calls the engine
/// ever issues against a granted tree; there is no path access behind them.
pub trait DocumentProvider {
    /// Lists the immediate children of a document.
    fn query_children(&self, document_id: &str) -> Result<Vec<DocumentRow>, ProviderError>;

    /// Deletes a document. Recursive by provider contract; the engine never
    /// walks a subtree to delete it.
    fn delete_document(&self, document_id: &str) -> Result<(), ProviderError>;
}

pub type SharedProvider = Arc<dyn DocumentProvider + Send + Sync>;

/// Storage access through an opaque document-tree grant.
pub struct ProviderFs {
    provider: SharedProvider,
}

impl ProviderFs {
    pub fn new(provider: SharedProvider) -> Self {
        Self { provider }
    }

    /// Node for the directory reached at `relative_path` under a tree
    /// grant. Child document ids are the tree id with the path appended,
    /// so the reference can be built without touching the provider.
    pub fn dir_node(tree: &str, relative_path: &str) -> Node {
        let name = relative_path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(relative_path)
            .to_string();
        Node {
            id: NodeId::Document(format!("{tree}{relative_path}")),
            name,
            is_dir: true,
            size: 0,
            last_modified: 0,
            can_write: true,
        }
    }

    fn node_from_row(row: DocumentRow) -> Node {
        let is_dir = row.mime_type == MIME_DIRECTORY;
        Node {
            id: NodeId::Document(row.document_id),
            name: row.display_name,
            is_dir,
            size: if is_dir { 0 } else { row.size },
            last_modified: row.last_modified,
            can_write: row.flags & FLAG_SUPPORTS_DELETE != 0,
        }
    }
}

impl CacheFs for ProviderFs {
    fn list_children(&self, node: &Node) -> Vec<Node> {
        let id = match &node.id {
            NodeId::Document(id) => id,
            NodeId::Path(_) => return vec![],
        };

        match self.provider.query_children(id) {
            Ok(rows) => rows
                .into_iter()
                .filter_map(|row| {
                    if row.display_name.is_empty() {
                        tracing::warn!(document_id = %row.document_id, "row has empty display name, skipping");
                        return None;
                    }
                    Some(Self::node_from_row(row))
                })
                .collect(),
            Err(e) => {
                tracing::debug!(document_id = %id, error = %e, "listing failed, treating as empty");
                vec![]
            }
        }
    }

    fn delete_recursive(&self, node: &Node) {
        if let NodeId::Document(id) = &node.id {
            if let Err(e) = self.provider.delete_document(id) {
                tracing::warn!(document_id = %id, error = %e, "delete failed");
            }
        }
    }

    fn legacy_name_len(&self) -> usize {
        LEGACY_NAME_LEN
    }
}
