//! The import run: read, group, fold, write, count.

use crate::emitter::RecordEmitter;
use crate::error::ImportResult;
use crate::group::{fold_group, group_rows};
use crate::io::csv::read_rows;
use crate::io::store::DocumentStore;
use crate::metrics::{ImportMetrics, Outcome};
use crate::row::Row;
use std::path::Path;
use tracing::{error, info, warn};

/// Group `rows`, fold each group, and write one document per group through `emitter`.
///
/// The empty key counts once as skipped. A failed write is logged and counted as errored;
/// it never stops the remaining groups.
pub fn import_rows<S: DocumentStore>(
    rows: Vec<Row>,
    emitter: &RecordEmitter<S>,
    metrics: &mut ImportMetrics,
) {
    metrics.set_rows_read(rows.len());
    let grouped = group_rows(rows);

    if grouped.has_empty_key() {
        warn!(
            rows = grouped.empty_key_rows(),
            "Skipping row(s) with empty Recitation text."
        );
        metrics.record(Outcome::Skipped);
    }

    for (text, group) in grouped.iter() {
        info!("Processing recitation: '{text}'");
        let record = fold_group(group);
        match emitter.emit(&record) {
            Ok(id) => {
                info!("  Successfully added document with ID: {id}");
                metrics.record(Outcome::Succeeded);
            }
            Err(e) => {
                error!("  ERROR: {e}");
                metrics.record(Outcome::Errored);
            }
        }
    }
}

/// Read the CSV at `input` and import it.
///
/// # Errors
/// Returns the setup error if the input cannot be read. Write failures are only counted.
pub fn run_import<S: DocumentStore>(
    input: impl AsRef<Path>,
    emitter: &RecordEmitter<S>,
) -> ImportResult<ImportMetrics> {
    let input = input.as_ref();
    let mut metrics = ImportMetrics::new();
    metrics.record_start();

    let rows = read_rows(input)?;
    info!("Successfully read {} rows from {}", rows.len(), input.display());
    info!(
        "Starting upload to collection '{}'...",
        emitter.collection()
    );
    import_rows(rows, emitter, &mut metrics);

    metrics.record_end();
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::FakeDocumentStore;

    #[test]
    fn outcomes_cover_every_key() {
        let store = FakeDocumentStore::new();
        store.fail_on_text("b");
        let emitter = RecordEmitter::new(&store, "recitations");
        let mut metrics = ImportMetrics::new();
        import_rows(
            vec![
                Row::new("a", "", "", "", ""),
                Row::new("", "", "", "", ""),
                Row::new("b", "", "", "", ""),
                Row::new("", "x", "", "", ""),
                Row::new("a", "", "", "", ""),
            ],
            &emitter,
            &mut metrics,
        );
        let s = metrics.summary();
        assert_eq!((s.succeeded, s.skipped, s.errored), (1, 1, 1));
        assert_eq!(s.total(), 3);
        assert_eq!(metrics.rows_read(), 5);
    }
}
