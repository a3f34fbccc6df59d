use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::builder::breakpoints::{ActiveBreakpoints, Breakpoint};
use crate::builder::elements::ElementData;

/// Access to the page builder's document model for one render.
pub trait DocumentProvider {
    /// Element tree of the document being rendered, if one could be resolved.
    fn current_elements(&self) -> Option<&[ElementData]>;

    fn active_breakpoints(&self) -> &ActiveBreakpoints;
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub elements: Vec<ElementData>,
}

#[derive(Debug, Deserialize)]
struct SiteFile {
    #[serde(default)]
    breakpoints: Vec<Breakpoint>,
    #[serde(default)]
    documents: HashMap<String, Document>,
}

/// Immutable snapshot of the site's builder data, shared across requests.
#[derive(Debug, Clone, Default)]
pub struct SiteStore {
    breakpoints: ActiveBreakpoints,
    documents: HashMap<String, Document>,
}

impl SiteStore {
    pub fn new(breakpoints: Vec<Breakpoint>, documents: HashMap<String, Document>) -> Self {
        Self {
            breakpoints: ActiveBreakpoints::from_config(breakpoints),
            documents,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: SiteFile = serde_json::from_str(raw).context("Site data is not valid JSON")?;
        Ok(Self::new(file.breakpoints, file.documents))
    }

    /// Loads the site file at `path`. No path means an empty site.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            warn!("SITE_DATA_PATH not set; serving with an empty site store");
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read site data from {}", path.display()))?;
        let store = Self::from_json(&raw)
            .with_context(|| format!("Failed to parse site data in {}", path.display()))?;

        info!(
            "Loaded site data: {} documents, {} active breakpoints",
            store.documents.len(),
            store.breakpoints.len()
        );
        Ok(store)
    }

    pub fn document(&self, document_id: &str) -> Option<&Document> {
        self.documents.get(document_id)
    }

    pub fn breakpoints(&self) -> &ActiveBreakpoints {
        &self.breakpoints
    }
}

/// A [`SiteStore`] viewed from the document being rendered.
pub struct SiteDocument<'a> {
    pub store: &'a SiteStore,
    pub document_id: &'a str,
}

impl DocumentProvider for SiteDocument<'_> {
    fn current_elements(&self) -> Option<&[ElementData]> {
        self.store
            .document(self.document_id)
            .map(|document| document.elements.as_slice())
    }

    fn active_breakpoints(&self) -> &ActiveBreakpoints {
        self.store.breakpoints()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SITE: &str = r#"{
        "breakpoints": [
            { "name": "desktop", "value": 1440 },
            { "name": "tablet", "value": 768 },
            { "name": "widescreen", "value": 2400, "enabled": false }
        ],
        "documents": {
            "home": { "elements": [ { "id": "abc", "settings": {} } ] },
            "empty": {}
        }
    }"#;

    #[test]
    fn test_from_json_builds_active_breakpoints() {
        let store = SiteStore::from_json(SITE).unwrap();
        let names: Vec<&str> = store
            .breakpoints()
            .as_slice()
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(names, vec!["tablet", "desktop"]);
    }

    #[test]
    fn test_site_document_resolves_elements() {
        let store = SiteStore::from_json(SITE).unwrap();
        let home = SiteDocument {
            store: &store,
            document_id: "home",
        };
        assert_eq!(home.current_elements().unwrap()[0].id, "abc");

        let empty = SiteDocument {
            store: &store,
            document_id: "empty",
        };
        assert!(empty.current_elements().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_document_has_no_elements() {
        let store = SiteStore::from_json(SITE).unwrap();
        let missing = SiteDocument {
            store: &store,
            document_id: "nope",
        };
        assert!(missing.current_elements().is_none());
        assert_eq!(missing.active_breakpoints().len(), 2);
    }

    #[test]
    fn test_load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SITE.as_bytes()).unwrap();

        let store = SiteStore::load(Some(file.path())).unwrap();
        assert!(store.document("home").is_some());
    }

    #[test]
    fn test_load_without_path_is_empty() {
        let store = SiteStore::load(None).unwrap();
        assert!(store.breakpoints().is_empty());
        assert!(store.document("home").is_none());
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = SiteStore::load(Some(file.path())).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse site data"));
    }
}
