use std::{
    collections::HashSet,
    fs,
    path::Path,
};

use crate::core::{
    VocabItem,
    VokabelError,
};

/// The fixed, ordered word list a session drills from.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<VocabItem>,
}

impl Catalog {
    pub fn new(items: Vec<VocabItem>) -> Result<Self, VokabelError> {
        let mut seen = HashSet::new();
        for item in &items {
            if item.examples.is_empty() {
                return Err(VokabelError::EmptyExamples(item.word.clone()));
            }
            // Both copies stay; they share one progress entry
            if !seen.insert(item.word.as_str()) {
                tracing::warn!("Duplicate catalog word '{}'", item.word);
            }
        }

        Ok(Self { items })
    }

    pub fn from_json_str(json: &str) -> Result<Self, VokabelError> {
        let items: Vec<VocabItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    pub fn load(path: &Path) -> Result<Self, VokabelError> {
        let json = fs::read_to_string(path).map_err(|e| {
            VokabelError::FailedToLoadFile(format!("{}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!("Loaded {} words from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn items(&self) -> &[VocabItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&VocabItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"[
        {"word": "der Hund", "examples": [
            {"sentence": "Der Hund schläft.", "sentence_translation": "The dog sleeps."}
        ]},
        {"word": "die Katze", "examples": [
            {"sentence": "Die Katze spielt.", "translation": "The cat plays."},
            {"sentence": "Wo ist die Katze?", "translation": "Where is the cat?"}
        ]}
    ]"#;

    #[test]
    fn test_parse_catalog_keeps_order() {
        let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.items()[0].word, "der Hund");
        assert_eq!(catalog.items()[1].examples.len(), 2);
        assert_eq!(catalog.get(1).unwrap().word, "die Katze");
        assert!(catalog.get(2).is_none());
    }

    #[test]
    fn test_rejects_item_without_examples() {
        let result = Catalog::from_json_str(r#"[{"word": "leer", "examples": []}]"#);
        match result {
            Err(VokabelError::EmptyExamples(word)) => assert_eq!(word, "leer"),
            other => panic!("Expected EmptyExamples, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let catalog = Catalog::from_json_str(
            r#"[
                {"word": "Bank", "examples": [{"sentence": "a", "translation": "bench"}]},
                {"word": "Bank", "examples": [{"sentence": "b", "translation": "bank"}]}
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.items()[0].examples[0].translation, "bench");
        assert_eq!(catalog.items()[1].examples[0].translation, "bank");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Catalog::load(&dir.path().join("vocab.json"));
        assert!(matches!(result, Err(VokabelError::FailedToLoadFile(_))));
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::from_json_str("[]").unwrap();
        assert!(catalog.is_empty());
    }
}
