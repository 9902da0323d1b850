//! In-memory document store for tests.

use crate::io::store::traits::{
    DocumentBody, DocumentStore, ErrorKind, FieldValue, StoreError, StoreResult,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

type CollectionStorage = Arc<Mutex<HashMap<String, Vec<StoredDocument>>>>;

/// A document as the fake store holds it.
///
/// Server timestamp placeholders stay in `data`; `create_time` is the tick of the fake server
/// clock they resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub id: String,
    pub data: DocumentBody,
    pub create_time: u64,
}

impl StoredDocument {
    /// The server-assigned value of `field`, if the document requested one there.
    #[must_use]
    pub fn server_timestamp(&self, field: &str) -> Option<u64> {
        matches!(self.data.get(field), Some(FieldValue::ServerTimestamp)).then_some(self.create_time)
    }
}

/// Fake [`DocumentStore`]: every `create` appends a new document, ids are sequential, and
/// server timestamps come from a logical clock that ticks once per write.
///
/// Writes can be made to fail for chosen `text` values, or for every document.
#[derive(Clone, Default)]
pub struct FakeDocumentStore {
    collections: CollectionStorage,
    failing_texts: Arc<Mutex<HashSet<String>>>,
    fail_all: Arc<Mutex<Option<ErrorKind>>>,
    clock: Arc<Mutex<u64>>,
}

impl FakeDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any document whose `text` field equals `text`.
    pub fn fail_on_text(&self, text: impl Into<String>) {
        self.failing_texts
            .lock()
            .expect("failing_texts mutex poisoned")
            .insert(text.into());
    }

    /// Reject every write with `kind`.
    pub fn fail_all(&self, kind: ErrorKind) {
        *self.fail_all.lock().expect("fail_all mutex poisoned") = Some(kind);
    }

    /// Documents in `collection`, in creation order.
    #[must_use]
    pub fn documents(&self, collection: &str) -> Vec<StoredDocument> {
        self.collections
            .lock()
            .expect("collections mutex poisoned")
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .expect("collections mutex poisoned")
            .get(collection)
            .map_or(0, Vec::len)
    }

    fn check_failure(&self, document: &DocumentBody) -> StoreResult<()> {
        if let Some(kind) = *self.fail_all.lock().expect("fail_all mutex poisoned") {
            return Err(StoreError::new(kind, "injected failure"));
        }
        if let Some(FieldValue::String(text)) = document.get("text")
            && self
                .failing_texts
                .lock()
                .expect("failing_texts mutex poisoned")
                .contains(text)
        {
            return Err(StoreError::new(
                ErrorKind::Authorization,
                format!("Permission denied for '{text}'"),
            ));
        }
        Ok(())
    }

    fn tick(&self) -> u64 {
        let mut clock = self.clock.lock().expect("clock mutex poisoned");
        *clock += 1;
        *clock
    }
}

impl DocumentStore for FakeDocumentStore {
    fn create(&self, collection: &str, document: DocumentBody) -> StoreResult<String> {
        self.check_failure(&document)?;
        let create_time = self.tick();

        let mut collections = self.collections.lock().expect("collections mutex poisoned");
        let coll = collections.entry(collection.to_string()).or_default();
        let id = format!("doc-{:06}", coll.len() + 1);
        coll.push(StoredDocument {
            id: id.clone(),
            data: document,
            create_time,
        });
        drop(collections);
        Ok(id)
    }
}
