//! Translation lookup for admin-facing labels.
//!
//! Labels are addressed by dotted keys (`HasRelatedProducts.Related`) and
//! always carry an English default, so a missing catalog never breaks the UI.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;

#[derive(Debug, Clone, Default)]
pub struct Translations {
    entries: HashMap<String, String>,
}

impl Translations {
    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        let entries: HashMap<String, String> =
            serde_json::from_str(raw).context("translations must be a flat JSON object of strings")?;
        Ok(Self { entries })
    }

    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading translations from {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    pub fn translate(&self, key: &str, default: &str) -> String {
        self.entries
            .get(key)
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Translations;

    #[test]
    fn falls_back_to_default_for_missing_or_blank_keys() {
        let t = Translations::from_json_str(r#"{"HasRelatedProducts.Related": "Verwandt", "Blank": ""}"#)
            .unwrap();
        assert_eq!(t.translate("HasRelatedProducts.Related", "Related"), "Verwandt");
        assert_eq!(t.translate("Blank", "Fallback"), "Fallback");
        assert_eq!(t.translate("Missing", "Related Products"), "Related Products");
    }

    #[test]
    fn rejects_nested_catalogs() {
        assert!(Translations::from_json_str(r#"{"a": {"b": "c"}}"#).is_err());
    }
}
