//! The folded per-recitation record.

use serde::Serialize;
use std::collections::BTreeMap;

/// One output document per distinct recitation text.
///
/// `contexts` holds no duplicates, and `is_active_for` has exactly one entry per element of
/// `contexts`. `createdAt` is not part of the record: the store assigns it at write time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecitationRecord {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_theme: Option<String>,
    pub contexts: Vec<String>,
    pub is_active_for: BTreeMap<String, bool>,
    pub is_archived: bool,
}

impl RecitationRecord {
    /// Checks the contexts/active-flag pairing.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.contexts.len());
        self.contexts.iter().all(|c| seen.insert(c.as_str()))
            && self.contexts.len() == self.is_active_for.len()
            && self.contexts.iter().all(|c| self.is_active_for.contains_key(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_axis_theme_is_not_serialized() -> anyhow::Result<()> {
        let record = RecitationRecord {
            text: "Hello".into(),
            axis_theme: None,
            contexts: vec!["Ctx1".into()],
            is_active_for: BTreeMap::from([("Ctx1".to_string(), false)]),
            is_archived: false,
        };
        let v = serde_json::to_value(&record)?;
        assert_eq!(
            v,
            json!({
                "text": "Hello",
                "contexts": ["Ctx1"],
                "isActiveFor": {"Ctx1": false},
                "isArchived": false,
            })
        );
        Ok(())
    }

    #[test]
    fn consistency_detects_orphan_flags() {
        let mut record = RecitationRecord {
            text: "t".into(),
            contexts: vec!["A".into()],
            is_active_for: BTreeMap::from([("A".to_string(), true)]),
            ..RecitationRecord::default()
        };
        assert!(record.is_consistent());
        record.is_active_for.insert("B".into(), false);
        assert!(!record.is_consistent());
        record.contexts.push("A".into());
        assert!(!record.is_consistent());
    }
}
