//! In-memory document provider used by tests.

use std::collections::HashMap;
use std::sync::Mutex;

use super::provider::{DocumentProvider, DocumentRow, ProviderError, FLAG_SUPPORTS_DELETE, MIME_DIRECTORY};

/// Stores listings keyed by parent document id and records every call, so
/// tests can assert probe order and delete targets.
#[derive(Default)]
pub struct FakeProvider {
    children: Mutex<HashMap<String, Vec<DocumentRow>>>,
    queried: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dir(&self, parent: &str, id: &str, name: &str, last_modified: i64) {
        self.add_row(
            parent,
            DocumentRow {
                document_id: id.to_string(),
                display_name: name.to_string(),
                size: 0,
                last_modified,
                mime_type: MIME_DIRECTORY.to_string(),
                flags: FLAG_SUPPORTS_DELETE,
            },
        );
    }

    pub fn add_file(&self, parent: &str, id: &str, name: &str, size: u64) {
        self.add_file_with_flags(parent, id, name, size, 0, FLAG_SUPPORTS_DELETE);
    }

    pub fn add_file_with_flags(
        &self,
        parent: &str,
        id: &str,
        name: &str,
        size: u64,
        last_modified: i64,
        flags: u32,
    ) {
        self.add_row(
            parent,
            DocumentRow {
                document_id: id.to_string(),
                display_name: name.to_string(),
                size,
                last_modified,
                mime_type: "application/octet-stream".to_string(),
                flags,
            },
        );
    }

    fn add_row(&self, parent: &str, row: DocumentRow) {
        self.children
            .lock()
            .unwrap()
            .entry(parent.to_string())
            .or_default()
            .push(row);
    }

    /// Parent document ids queried so far, in call order.
    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }

    /// Document ids deleted so far, in call order.
    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

impl DocumentProvider for FakeProvider {
    fn query_children(&self, document_id: &str) -> Result<Vec<DocumentRow>, ProviderError> {
        self.queried.lock().unwrap().push(document_id.to_string());
        self.children
            .lock()
            .unwrap()
            .get(document_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(document_id.to_string()))
    }

    fn delete_document(&self, document_id: &str) -> Result<(), ProviderError> {
        self.deleted.lock().unwrap().push(document_id.to_string());

        let mut children = self.children.lock().unwrap();
        let prefix = format!("{document_id}/");
        children.retain(|parent, _| parent != document_id && !parent.starts_with(&prefix));
        for rows in children.values_mut() {
            rows.retain(|row| row.document_id != document_id);
        }
        Ok(())
    }
}
