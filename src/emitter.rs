//! Turns folded records into store documents and writes them.

use crate::error::{ImportError, ImportResult};
use crate::io::store::{DocumentBody, DocumentStore, FieldValue};
use crate::record::RecitationRecord;

/// Default target collection.
pub const DEFAULT_COLLECTION: &str = "recitations";

/// Field the store fills with its own clock.
pub const CREATED_AT_FIELD: &str = "createdAt";

/// Build the document for `record`, requesting a server timestamp for `createdAt`.
///
/// `axisTheme` is left out entirely when the record has none.
#[must_use]
pub fn to_document(record: &RecitationRecord) -> DocumentBody {
    let mut doc = DocumentBody::new();
    doc.insert("text".into(), FieldValue::from(record.text.as_str()));
    if let Some(axis) = &record.axis_theme {
        doc.insert("axisTheme".into(), FieldValue::from(axis.as_str()));
    }
    doc.insert(
        "contexts".into(),
        FieldValue::Array(
            record
                .contexts
                .iter()
                .map(|c| FieldValue::from(c.as_str()))
                .collect(),
        ),
    );
    doc.insert(
        "isActiveFor".into(),
        FieldValue::Map(
            record
                .is_active_for
                .iter()
                .map(|(c, active)| (c.clone(), FieldValue::Bool(*active)))
                .collect(),
        ),
    );
    doc.insert("isArchived".into(), FieldValue::Bool(record.is_archived));
    doc.insert(CREATED_AT_FIELD.into(), FieldValue::ServerTimestamp);
    doc
}

/// Writes one document per record into a fixed collection of an injected store.
pub struct RecordEmitter<S> {
    store: S,
    collection: String,
}

impl<S: DocumentStore> RecordEmitter<S> {
    pub fn new(store: S, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Issue exactly one create for `record` and return the new document id.
    ///
    /// # Errors
    /// Returns [`ImportError::WriteFailed`] carrying the record's text and the store error.
    pub fn emit(&self, record: &RecitationRecord) -> ImportResult<String> {
        self.store
            .create(&self.collection, to_document(record))
            .map_err(|cause| ImportError::WriteFailed {
                text: record.text.clone(),
                cause,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::{ErrorKind, FakeDocumentStore};
    use std::collections::BTreeMap;

    fn record(axis: Option<&str>) -> RecitationRecord {
        RecitationRecord {
            text: "I am calm".into(),
            axis_theme: axis.map(str::to_string),
            contexts: vec!["Morning".into(), "Work".into()],
            is_active_for: BTreeMap::from([
                ("Morning".to_string(), true),
                ("Work".to_string(), false),
            ]),
            is_archived: true,
        }
    }

    #[test]
    fn document_shape() {
        let doc = to_document(&record(Some("Mind")));
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["axisTheme", "contexts", "createdAt", "isActiveFor", "isArchived", "text"]
        );
        assert_eq!(doc["createdAt"], FieldValue::ServerTimestamp);
        assert_eq!(doc["axisTheme"], FieldValue::from("Mind"));
        assert_eq!(
            doc["contexts"],
            FieldValue::Array(vec![FieldValue::from("Morning"), FieldValue::from("Work")])
        );
    }

    #[test]
    fn missing_axis_is_omitted() {
        let doc = to_document(&record(None));
        assert!(!doc.contains_key("axisTheme"));
    }

    #[test]
    fn emit_writes_once_to_collection() -> ImportResult<()> {
        let store = FakeDocumentStore::new();
        let emitter = RecordEmitter::new(&store, "recitations");
        let id = emitter.emit(&record(None))?;
        let docs = store.documents("recitations");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
        assert!(docs[0].server_timestamp(CREATED_AT_FIELD).is_some());
        Ok(())
    }

    #[test]
    fn emit_failure_carries_text() {
        let store = FakeDocumentStore::new();
        store.fail_all(ErrorKind::Network);
        let emitter = RecordEmitter::new(&store, "recitations");
        match emitter.emit(&record(None)) {
            Err(ImportError::WriteFailed { text, cause }) => {
                assert_eq!(text, "I am calm");
                assert_eq!(cause.kind, ErrorKind::Network);
            }
            other => panic!("expected WriteFailed, got {other:?}"),
        }
    }
}
