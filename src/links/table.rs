//! Ordered value -> (label, URL) table backing the picker.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single table entry as declared in a links file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Stable identifier used for lookups (e.g. `"agder"`).
    pub value: String,
    /// Display text shown in the option list (e.g. `"Agder"`).
    pub label: String,
    /// Destination opened when the option is selected.
    pub url: String,
}

/// An option presented by the picker: value plus display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOption {
    pub value: String,
    pub label: String,
}

/// Read-only mapping from option value to destination URL.
///
/// Entries keep their declaration order, which is also the display order of
/// the derived option list.
#[derive(Debug, Clone)]
pub struct LinkTable {
    entries: Vec<LinkEntry>,
}

impl LinkTable {
    /// Build a table from explicit entries.
    pub fn new(entries: Vec<LinkEntry>) -> Self {
        Self { entries }
    }

    /// The built-in table of the 14 Norges Bondelag county chapters.
    pub fn builtin() -> Self {
        let entry = |value: &str, label: &str, url: &str| LinkEntry {
            value: value.to_string(),
            label: label.to_string(),
            url: url.to_string(),
        };

        Self::new(vec![
            entry(
                "akershus",
                "Akershus",
                "https://www.bondelaget.no/fylkeslag/akershus/",
            ),
            entry("agder", "Agder", "https://www.bondelaget.no/fylkeslag/agder/"),
            entry(
                "buskerud",
                "Buskerud",
                "https://www.bondelaget.no/fylkeslag/buskerud/",
            ),
            entry(
                "finnmark",
                "Finnmark",
                "https://www.bondelaget.no/fylkeslag/finnmark/",
            ),
            entry("innlandet", "Innlandet", "https://www.bondelaget.no/innlandet/"),
            entry(
                "more-romsdal",
                "Møre og Romsdal",
                "https://www.bondelaget.no/moreogromsdal/",
            ),
            entry(
                "nordland",
                "Nordland",
                "https://www.bondelaget.no/fylkeslag/nordland/",
            ),
            entry(
                "rogaland",
                "Rogaland",
                "https://www.bondelaget.no/fylkeslag/rogaland/",
            ),
            entry(
                "telemark",
                "Telemark",
                "https://www.bondelaget.no/fylkeslag/telemark/",
            ),
            entry("troms", "Troms", "https://www.bondelaget.no/fylkeslag/troms/"),
            entry("trondelag", "Trøndelag", "https://www.bondelaget.no/trondelag/"),
            entry(
                "vestfold",
                "Vestfold",
                "https://www.bondelaget.no/fylkeslag/vestfold/",
            ),
            entry(
                "vestland",
                "Vestland",
                "https://www.bondelaget.no/fylkeslag/vestland/",
            ),
            entry(
                "ostfold",
                "Østfold",
                "https://www.bondelaget.no/fylkeslag/ostfold/",
            ),
        ])
    }

    /// Load a table from a JSON file containing an array of entries.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read links file: {}", path.display()))?;

        let entries: Vec<LinkEntry> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse links file: {}", path.display()))?;

        Ok(Self::new(entries))
    }

    /// Look up the destination URL for a value.
    pub fn url_for(&self, value: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.value == value)
            .map(|e| e.url.as_str())
    }

    /// Derive the option list in declaration order.
    pub fn options(&self) -> Vec<LinkOption> {
        self.entries
            .iter()
            .map(|e| LinkOption {
                value: e.value.clone(),
                label: e.label.clone(),
            })
            .collect()
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &[LinkEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_table_has_all_counties() {
        let table = LinkTable::builtin();
        assert_eq!(table.len(), 14);
        assert_eq!(
            table.url_for("agder"),
            Some("https://www.bondelaget.no/fylkeslag/agder/")
        );
        assert_eq!(
            table.url_for("trondelag"),
            Some("https://www.bondelaget.no/trondelag/")
        );
    }

    #[test]
    fn test_url_for_unknown_value() {
        let table = LinkTable::builtin();
        assert_eq!(table.url_for("svalbard"), None);
    }

    #[test]
    fn test_options_preserve_declaration_order() {
        let table = LinkTable::builtin();
        let options = table.options();
        assert_eq!(options[0].value, "akershus");
        assert_eq!(options[1].label, "Agder");
        assert_eq!(options.last().map(|o| o.label.as_str()), Some("Østfold"));
    }

    #[test]
    fn test_load_from_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("links.json");
        std::fs::write(
            &path,
            r#"[{"value": "a", "label": "Alpha", "url": "https://example.com/a"}]"#,
        )
        .unwrap();

        let table = LinkTable::load_from(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.url_for("a"), Some("https://example.com/a"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("does_not_exist.json");

        let result = LinkTable::load_from(&path);
        assert!(result.is_err());
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("Failed to read links file"));
    }

    #[test]
    fn test_load_from_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("links.json");
        std::fs::write(&path, "not json").unwrap();

        let result = LinkTable::load_from(&path);
        assert!(result.is_err());
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("Failed to parse links file"));
    }
}
