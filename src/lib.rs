//! # Recitations
//!
//! Imports a recitations CSV export into a document database, one document per distinct
//! recitation text.
//!
//! ## Pipeline
//!
//! 1. **Read** - [`read_rows`] parses the CSV into [`Row`]s in file order.
//! 2. **Group** - [`group_rows`] partitions rows by recitation text. Groups come out in
//!    ascending key order; rows with an empty text are only counted.
//! 3. **Fold** - [`RecitationFold`] reduces each group to a [`RecitationRecord`]:
//!    - `axisTheme` is the first non-empty axis, and is omitted when there is none,
//!    - `isArchived` is taken from the group's first row,
//!    - `contexts` lists each non-empty context once, in first-seen order,
//!    - `isActiveFor` keeps the last active flag seen per context.
//! 4. **Write** - [`RecordEmitter`] issues one `create` per record against an injected
//!    [`DocumentStore`]; the store stamps `createdAt`.
//! 5. **Report** - [`ImportMetrics`] counts succeeded, skipped and errored groups.
//!
//! A failed write is logged and counted; the run continues. Only setup problems (unreadable
//! input, missing columns, no store session) abort it.
//!
//! ## Quick Start
//!
//! ```
//! use recitations::*;
//! use recitations::io::store::FakeDocumentStore;
//!
//! let store = FakeDocumentStore::new();
//! let emitter = RecordEmitter::new(&store, "recitations");
//! let mut metrics = ImportMetrics::new();
//!
//! import_rows(
//!     vec![
//!         Row::new("Hello", "Ctx1", "", "FALSE", "TRUE"),
//!         Row::new("Hello", "Ctx1", "", "FALSE", "FALSE"),
//!     ],
//!     &emitter,
//!     &mut metrics,
//! );
//!
//! assert_eq!(metrics.summary().succeeded, 1);
//! assert_eq!(store.count("recitations"), 1);
//! ```
//!
//! ## Feature Flags
//!
//! - `firestore` - Cloud Firestore REST backend ([`io::store::FirestoreStore`])
//! - `compression-gzip` - read gzip-compressed CSV transparently
//!
//! ## Module Overview
//!
//! - [`row`] - input rows and flag parsing
//! - [`record`] - the folded output record
//! - [`group`] - grouping and per-group folding
//! - [`combiners`] - the [`CombineFn`] trait and [`RecitationFold`]
//! - [`emitter`] - record-to-document mapping and writes
//! - [`io`] - CSV input, decompression, and document stores
//! - [`metrics`] - outcome counters and the summary
//! - [`import`] - the end-to-end run
//! - [`config`] - resolved run settings

pub mod combiners;
pub mod config;
pub mod emitter;
pub mod error;
pub mod group;
pub mod import;
pub mod io;
pub mod metrics;
pub mod record;
pub mod row;

pub use combiners::{CombineFn, LiftableCombiner, RecitationFold};
pub use config::{ImportConfig, StoreTarget};
pub use emitter::{RecordEmitter, to_document};
pub use error::{ImportError, ImportResult};
pub use group::{GroupedRows, fold_group, group_rows};
pub use import::{import_rows, run_import};
pub use io::csv::read_rows;
pub use io::store::DocumentStore;
pub use metrics::{ImportMetrics, ImportSummary, Outcome};
pub use record::RecitationRecord;
pub use row::Row;
