//! Input rows as parsed from the recitations CSV.

use serde::Deserialize;

/// Header names the CSV must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Recitation", "Context", "Axis", "Archived", "Active"];

/// One line of the input table.
///
/// Every field is a raw string. `Recitation`, `Context` and `Axis` are normalized so that a
/// missing or blank cell reads as `""`; `Archived` and `Active` are kept exactly as written
/// and interpreted later by [`is_true_flag`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Row {
    #[serde(rename = "Recitation", default, deserialize_with = "blank_as_empty")]
    pub recitation_text: String,
    #[serde(rename = "Context", default, deserialize_with = "blank_as_empty")]
    pub context: String,
    #[serde(rename = "Axis", default, deserialize_with = "blank_as_empty")]
    pub axis: String,
    #[serde(rename = "Archived", default)]
    pub archived: String,
    #[serde(rename = "Active", default)]
    pub active: String,
}

impl Row {
    pub fn new(
        recitation_text: impl Into<String>,
        context: impl Into<String>,
        axis: impl Into<String>,
        archived: impl Into<String>,
        active: impl Into<String>,
    ) -> Self {
        Self {
            recitation_text: recitation_text.into(),
            context: context.into(),
            axis: axis.into(),
            archived: archived.into(),
            active: active.into(),
        }
    }
}

/// Interpret a bool-like cell: `TRUE` in any case, surrounding whitespace ignored.
#[must_use]
pub fn is_true_flag(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("TRUE")
}

/// A missing cell, and one holding only whitespace, both read as `""`. Non-blank cells are kept
/// untrimmed. Whitespace-only recitation text therefore joins the skipped empty key rather than
/// forming a group of its own, which differs from treating only the literal empty cell as
/// missing.
fn blank_as_empty<'de, D>(de: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Option::<String>::deserialize(de)?;
    Ok(match v {
        Some(s) if !s.trim().is_empty() => s,
        _ => String::new(),
    })
}
