//! Core types for document store writes.
//!
//! The store interface is synchronous: an implementation that talks to a remote service blocks
//! until the service answers.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

// ============================================================================
// Core Error Type
// ============================================================================

/// Error raised by a [`DocumentStore`].
#[derive(Debug, Clone)]
pub struct StoreError {
    pub message: String,
    pub kind: ErrorKind,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authentication,
    Authorization,
    NotFound,
    AlreadyExists,
    InvalidInput,
    Network,
    Timeout,
    ServiceUnavailable,
    RateLimited,
    InternalError,
    Other,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)?;
        if let Some(source) = &self.source {
            write!(f, " ({source})")?;
        }
        Ok(())
    }
}

impl Error for StoreError {}

impl StoreError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================================
// Document Values
// ============================================================================

/// A field value in a stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    String(String),
    Bool(bool),
    Array(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
    /// Placeholder the store replaces with its own clock at write time.
    ServerTimestamp,
}

/// Plain JSON rendering, used for logging documents.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(v) => v.serialize(s),
            Self::Bool(v) => v.serialize(s),
            Self::Array(v) => v.serialize(s),
            Self::Map(v) => v.serialize(s),
            Self::ServerTimestamp => s.serialize_str("<server timestamp>"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// An ordered set of top-level fields.
pub type DocumentBody = BTreeMap<String, FieldValue>;

// ============================================================================
// DocumentStore - Document/NoSQL Databases
// ============================================================================

/// Create-only access to a document database collection.
pub trait DocumentStore {
    /// Add `document` to `collection` under a store-assigned id and return that id.
    ///
    /// Fields set to [`FieldValue::ServerTimestamp`] are filled in by the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be delivered, permissions are not enough, or the
    /// store rejects the document
    fn create(&self, collection: &str, document: DocumentBody) -> StoreResult<String>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn create(&self, collection: &str, document: DocumentBody) -> StoreResult<String> {
        (**self).create(collection, document)
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for Box<S> {
    fn create(&self, collection: &str, document: DocumentBody) -> StoreResult<String> {
        (**self).create(collection, document)
    }
}
