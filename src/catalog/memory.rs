use super::{ArtifactCatalog, CatalogError, CatalogQuery, ItemDescriptor, MATCH_ALL_SEARCH_TERM};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Catalog served from a fixed list of descriptors, used for offline runs
/// and tests. Searches ignore the artifact type.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    items: Vec<ItemDescriptor>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped { items: Vec<ItemDescriptor> },
    Bare(Vec<ItemDescriptor>),
}

impl MemoryCatalog {
    pub fn new(items: Vec<ItemDescriptor>) -> Self {
        Self { items }
    }

    /// Reads either a bare JSON array of descriptors or a `{"items": [...]}`
    /// document, the same shape the catalog endpoint returns.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let parsed: CatalogFile =
            serde_json::from_str(&raw).map_err(|source| CatalogError::ParseFile {
                path: path.display().to_string(),
                source,
            })?;
        let items = match parsed {
            CatalogFile::Wrapped { items } => items,
            CatalogFile::Bare(items) => items,
        };
        Ok(Self::new(items))
    }

    pub fn items(&self) -> &[ItemDescriptor] {
        &self.items
    }
}

impl ArtifactCatalog for MemoryCatalog {
    fn get_artifacts(&self, query: &CatalogQuery) -> Result<Vec<ItemDescriptor>, CatalogError> {
        match query {
            CatalogQuery::Search { search_term, .. } => {
                if search_term == MATCH_ALL_SEARCH_TERM {
                    return Ok(self.items.clone());
                }
                let needle = search_term.to_ascii_lowercase();
                Ok(self
                    .items
                    .iter()
                    .filter(|item| item.name.to_ascii_lowercase().contains(&needle))
                    .cloned()
                    .collect())
            }
            CatalogQuery::Names(names) => Ok(names
                .iter()
                .filter_map(|name| self.items.iter().find(|item| &item.name == name))
                .cloned()
                .collect()),
        }
    }
}
