pub mod api;
pub mod error;
pub mod memory;
pub mod search;

pub use api::CatalogApiClient;
pub use error::CatalogError;
pub use memory::MemoryCatalog;
pub use search::{search_term_for_filter, CatalogDispatcher, CatalogEvent, SearchPane};

use serde::{Deserialize, Serialize};

/// Search term the catalog reads as "match everything".
pub const MATCH_ALL_SEARCH_TERM: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArtifactType {
    #[default]
    Client,
    Server,
    ClientEvent,
    ServerEvent,
}

impl ArtifactType {
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactType::Client => "CLIENT",
            ArtifactType::Server => "SERVER",
            ArtifactType::ClientEvent => "CLIENT_EVENT",
            ArtifactType::ServerEvent => "SERVER_EVENT",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "CLIENT" => Ok(ArtifactType::Client),
            "SERVER" => Ok(ArtifactType::Server),
            "CLIENT_EVENT" => Ok(ArtifactType::ClientEvent),
            "SERVER_EVENT" => Ok(ArtifactType::ServerEvent),
            _ => Err(format!(
                "unknown artifact type `{raw}`; expected CLIENT, SERVER, CLIENT_EVENT or SERVER_EVENT"
            )),
        }
    }
}

impl std::fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One editable parameter of an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
}

impl ParamSpec {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            default: None,
            description: None,
            param_type: None,
        }
    }

    pub fn is_bool(&self) -> bool {
        self.param_type.as_deref() == Some("bool")
    }
}

/// A catalog artifact. Identity is `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParamSpec>,
}

impl ItemDescriptor {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<ParamSpec>) -> Self {
        self.parameters = parameters;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    Search {
        artifact_type: ArtifactType,
        search_term: String,
    },
    Names(Vec<String>),
}

impl CatalogQuery {
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            CatalogQuery::Search {
                artifact_type,
                search_term,
            } => vec![
                ("type", artifact_type.as_str().to_string()),
                ("search_term", search_term.clone()),
            ],
            CatalogQuery::Names(names) => names.iter().map(|name| ("names", name.clone())).collect(),
        }
    }
}

/// Source of artifact descriptors for the wizard.
pub trait ArtifactCatalog: Send + Sync {
    fn get_artifacts(&self, query: &CatalogQuery) -> Result<Vec<ItemDescriptor>, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_type_parse_accepts_case_and_dashes() {
        assert_eq!(ArtifactType::parse("client"), Ok(ArtifactType::Client));
        assert_eq!(
            ArtifactType::parse("server-event"),
            Ok(ArtifactType::ServerEvent)
        );
        assert!(ArtifactType::parse("notebook").is_err());
    }

    #[test]
    fn names_query_repeats_the_names_key() {
        let query = CatalogQuery::Names(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(
            query.query_pairs(),
            vec![("names", "A".to_string()), ("names", "B".to_string())]
        );
    }

    #[test]
    fn descriptor_decodes_catalog_shape() {
        let item: ItemDescriptor = serde_json::from_str(
            r#"{"name":"Generic.Client.Info","parameters":[{"name":"Key1","default":"x","type":"bool"}]}"#,
        )
        .expect("descriptor");
        assert_eq!(item.name, "Generic.Client.Info");
        assert_eq!(item.parameters[0].default.as_deref(), Some("x"));
        assert!(item.parameters[0].is_bool());
        assert!(item.description.is_none());
    }
}
