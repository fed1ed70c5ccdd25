use super::{ArtifactCatalog, CatalogError, CatalogQuery, ItemDescriptor};
use serde::Deserialize;
use std::time::Duration;

pub const GET_ARTIFACTS_PATH: &str = "v1/GetArtifacts";

/// Blocking client for the console's artifact catalog endpoint.
#[derive(Debug, Clone)]
pub struct CatalogApiClient {
    api_base: String,
    api_token: Option<String>,
    agent: ureq::Agent,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct GetArtifactsResponse {
    #[serde(default)]
    items: Option<Vec<ItemDescriptor>>,
}

impl CatalogApiClient {
    pub fn new(api_base: &str, api_token: Option<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            api_base: api_base.to_string(),
            api_token: api_token.filter(|token| !token.trim().is_empty()),
            agent,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), path)
    }

    pub(crate) fn request_url(&self, query: &CatalogQuery) -> String {
        let url = self.endpoint(GET_ARTIFACTS_PATH);
        let pairs = query.query_pairs();
        if pairs.is_empty() {
            return url;
        }
        let encoded = pairs
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{url}?{encoded}")
    }
}

impl ArtifactCatalog for CatalogApiClient {
    fn get_artifacts(&self, query: &CatalogQuery) -> Result<Vec<ItemDescriptor>, CatalogError> {
        let url = self.request_url(query);
        let mut request = self.agent.get(&url);
        if let Some(token) = &self.api_token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }
        let response = request.call().map_err(|e| CatalogError::Request {
            url: url.clone(),
            message: e.to_string(),
        })?;
        let body = response
            .into_json::<GetArtifactsResponse>()
            .map_err(|e| CatalogError::Decode {
                url: url.clone(),
                message: e.to_string(),
            })?;
        Ok(body.items.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ArtifactType;

    #[test]
    fn request_url_encodes_search_term_and_type() {
        let client = CatalogApiClient::new(
            "https://console.local/api/",
            None,
            Duration::from_secs(5),
        );
        let url = client.request_url(&CatalogQuery::Search {
            artifact_type: ArtifactType::Client,
            search_term: "Generic Info".to_string(),
        });
        assert_eq!(
            url,
            "https://console.local/api/v1/GetArtifacts?type=CLIENT&search_term=Generic%20Info"
        );
    }

    #[test]
    fn blank_token_is_dropped() {
        let client =
            CatalogApiClient::new("http://127.0.0.1", Some("  ".to_string()), Duration::from_secs(1));
        assert!(client.api_token.is_none());
    }
}
