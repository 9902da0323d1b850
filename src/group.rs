//! Group rows by recitation text and fold each group.

use crate::combiners::{CombineFn, LiftableCombiner, RecitationFold};
use crate::record::RecitationRecord;
use crate::row::Row;
use std::collections::BTreeMap;

/// Rows partitioned by recitation text.
///
/// Groups iterate in ascending byte-wise order of the key; rows inside a group keep file order.
/// Rows with an empty key are not grouped; they are only counted.
#[derive(Clone, Debug, Default)]
pub struct GroupedRows {
    groups: BTreeMap<String, Vec<Row>>,
    empty_key_rows: usize,
}

impl GroupedRows {
    /// Number of non-empty keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Rows whose recitation text was empty.
    #[must_use]
    pub const fn empty_key_rows(&self) -> usize {
        self.empty_key_rows
    }

    /// Whether any row carried the empty key. The empty key is one skipped group no matter how
    /// many rows share it.
    #[must_use]
    pub const fn has_empty_key(&self) -> bool {
        self.empty_key_rows > 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Row])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Partition `rows` by recitation text in one pass.
#[must_use]
pub fn group_rows(rows: Vec<Row>) -> GroupedRows {
    let mut out = GroupedRows::default();
    for row in rows {
        if row.recitation_text.is_empty() {
            out.empty_key_rows += 1;
            continue;
        }
        out.groups
            .entry(row.recitation_text.clone())
            .or_default()
            .push(row);
    }
    out
}

/// Fold one group's rows (in file order) into its record.
#[must_use]
pub fn fold_group(rows: &[Row]) -> RecitationRecord {
    let fold = RecitationFold::new();
    fold.finish(fold.build_from_group(rows))
}
