//! `RecitationFold`: reduces the rows of one recitation group into a record.

use crate::combiners::{CombineFn, LiftableCombiner};
use crate::record::RecitationRecord;
use crate::row::{Row, is_true_flag};
use std::collections::BTreeMap;

/// Fold rows sharing a recitation text into one [`RecitationRecord`].
///
/// Rows must be added in file order:
/// - `axis_theme` takes the first non-empty trimmed `Axis`,
/// - `is_archived` comes from the first row only,
/// - each non-empty trimmed `Context` is appended once, and its active flag is overwritten by
///   every later row naming the same context.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecitationFold;

impl RecitationFold {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Accumulator for [`RecitationFold`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecitationAcc {
    text: Option<String>,
    axis_theme: Option<String>,
    is_archived: Option<bool>,
    contexts: Vec<String>,
    is_active_for: BTreeMap<String, bool>,
}

impl RecitationAcc {
    fn note_context(&mut self, context: String, active: bool) {
        if !self.is_active_for.contains_key(&context) {
            self.contexts.push(context.clone());
        }
        self.is_active_for.insert(context, active);
    }
}

impl CombineFn<Row, RecitationAcc, RecitationRecord> for RecitationFold {
    fn create(&self) -> RecitationAcc {
        RecitationAcc::default()
    }

    fn add_input(&self, acc: &mut RecitationAcc, row: Row) {
        if acc.text.is_none() {
            acc.text = Some(row.recitation_text);
        }
        if acc.is_archived.is_none() {
            acc.is_archived = Some(is_true_flag(&row.archived));
        }
        if acc.axis_theme.is_none() {
            let axis = row.axis.trim();
            if !axis.is_empty() {
                acc.axis_theme = Some(axis.to_string());
            }
        }
        let context = row.context.trim();
        if !context.is_empty() {
            acc.note_context(context.to_string(), is_true_flag(&row.active));
        }
    }

    fn merge(&self, acc: &mut RecitationAcc, other: RecitationAcc) {
        let RecitationAcc {
            text,
            axis_theme,
            is_archived,
            contexts,
            mut is_active_for,
        } = other;
        if acc.text.is_none() {
            acc.text = text;
        }
        if acc.is_archived.is_none() {
            acc.is_archived = is_archived;
        }
        if acc.axis_theme.is_none() {
            acc.axis_theme = axis_theme;
        }
        for context in contexts {
            // every context in `other` has a flag; the fallback is unreachable
            let active = is_active_for.remove(&context).unwrap_or(false);
            acc.note_context(context, active);
        }
    }

    fn finish(&self, acc: RecitationAcc) -> RecitationRecord {
        RecitationRecord {
            text: acc.text.unwrap_or_default(),
            axis_theme: acc.axis_theme,
            contexts: acc.contexts,
            is_active_for: acc.is_active_for,
            is_archived: acc.is_archived.unwrap_or(false),
        }
    }
}

impl LiftableCombiner<Row, RecitationAcc, RecitationRecord> for RecitationFold {
    fn build_from_group(&self, values: &[Row]) -> RecitationAcc {
        let mut acc = self.create();
        for row in values {
            self.add_input(&mut acc, row.clone());
        }
        acc
    }
}
