use super::request::Request;
use crate::shared::errors::BaseFlowError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A previously launched flow whose request seeds the wizard in edit mode.
/// Fields beyond `session_id` and `request` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BaseFlow {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub request: Option<Request>,
}

impl BaseFlow {
    pub fn from_request(request: Request) -> Self {
        Self {
            session_id: None,
            request: Some(request),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, BaseFlowError> {
        let raw = fs::read_to_string(path).map_err(|source| BaseFlowError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| BaseFlowError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Artifact names to resolve for hydration, when the flow carries a
    /// request with at least one artifact.
    pub fn hydration_names(&self) -> Option<&[String]> {
        self.request
            .as_ref()
            .map(|request| request.artifacts.as_slice())
            .filter(|names| !names.is_empty())
    }
}
