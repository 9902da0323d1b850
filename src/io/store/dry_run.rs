//! A store that only logs what it would write.

use crate::io::store::traits::{DocumentBody, DocumentStore, StoreResult};
use std::cell::Cell;
use tracing::info;

/// Logs each document as JSON and hands back a synthetic id. Nothing leaves the process.
#[derive(Debug, Default)]
pub struct DryRunStore {
    written: Cell<usize>,
}

impl DryRunStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents "written" so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written.get()
    }
}

impl DocumentStore for DryRunStore {
    fn create(&self, collection: &str, document: DocumentBody) -> StoreResult<String> {
        let n = self.written.get() + 1;
        self.written.set(n);
        let json = serde_json::to_string(&document).unwrap_or_else(|e| format!("<{e}>"));
        info!(collection, document = %json, "dry run: would add document");
        Ok(format!("dry-run-{n}"))
    }
}
