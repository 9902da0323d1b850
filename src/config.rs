//! Resolved settings for one import run.

use crate::emitter::DEFAULT_COLLECTION;
use crate::error::{ImportError, ImportResult};
#[cfg(feature = "firestore")]
use crate::io::store::FirestoreConfig;
use std::path::PathBuf;

/// Where the store writes go.
#[derive(Debug, Clone)]
pub enum StoreTarget {
    /// Log documents instead of writing them.
    DryRun,
    #[cfg(feature = "firestore")]
    Firestore(FirestoreConfig),
}

#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub input: PathBuf,
    pub collection: String,
    pub target: StoreTarget,
    pub metrics_out: Option<PathBuf>,
}

impl ImportConfig {
    pub fn new(input: impl Into<PathBuf>, target: StoreTarget) -> Self {
        Self {
            input: input.into(),
            collection: DEFAULT_COLLECTION.to_string(),
            target,
            metrics_out: None,
        }
    }

    /// # Errors
    ///
    /// Returns [`ImportError::Config`] for an empty input path or collection name, or a
    /// collection name containing `/`.
    pub fn validate(&self) -> ImportResult<()> {
        if self.input.as_os_str().is_empty() {
            return Err(ImportError::Config("input path is empty".into()));
        }
        let collection = self.collection.trim();
        if collection.is_empty() {
            return Err(ImportError::Config("collection name is empty".into()));
        }
        if collection.contains('/') {
            return Err(ImportError::Config(format!(
                "collection name '{collection}' must not contain '/'"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_recitations_collection() {
        let cfg = ImportConfig::new("in.csv", StoreTarget::DryRun);
        assert_eq!(cfg.collection, "recitations");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_bad_collection_names() {
        let mut cfg = ImportConfig::new("in.csv", StoreTarget::DryRun);
        cfg.collection = " ".into();
        assert!(matches!(cfg.validate(), Err(ImportError::Config(_))));
        cfg.collection = "a/b".into();
        assert!(matches!(cfg.validate(), Err(ImportError::Config(_))));
    }
}
