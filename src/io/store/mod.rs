//! Document store abstraction used by the record emitter.
//!
//! [`DocumentStore`] is the narrow contract the import depends on: one `create` call per
//! document, returning the id the store assigned. Implementations:
//!
//! - [`FirestoreStore`] - Cloud Firestore over REST (feature `firestore`)
//! - [`FakeDocumentStore`] - in-memory store with failure injection, for tests
//! - [`DryRunStore`] - logs documents instead of writing them
//!
//! Errors are [`StoreError`] values categorised by [`ErrorKind`].

pub mod dry_run;
pub mod fake;
#[cfg_attr(docsrs, doc(cfg(feature = "firestore")))]
#[cfg(feature = "firestore")]
pub mod firestore;
pub mod traits;

pub use dry_run::DryRunStore;
pub use fake::{FakeDocumentStore, StoredDocument};
#[cfg(feature = "firestore")]
pub use firestore::{FirestoreConfig, FirestoreStore};
pub use traits::*;
