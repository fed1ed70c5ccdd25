use super::parameters::ParameterMap;
use super::resources::ResourceLimits;
use crate::catalog::ItemDescriptor;
use crate::shared::serde_ext::deserialize_loose_u64;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvEntry {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// Parameter env of a request. Always written as `{"env": [...]}`; reads
/// also accept a flat `{"name": "value"}` object, which is normalized into
/// env entries in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<IncomingParameters>")]
pub struct RequestParameters {
    pub env: Vec<EnvEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IncomingParameters {
    Env { env: Vec<EnvEntry> },
    Flat(BTreeMap<String, serde_json::Value>),
}

impl From<Option<IncomingParameters>> for RequestParameters {
    fn from(incoming: Option<IncomingParameters>) -> Self {
        let env = match incoming {
            None => Vec::new(),
            Some(IncomingParameters::Env { env }) => env,
            Some(IncomingParameters::Flat(values)) => values
                .into_iter()
                .map(|(key, value)| EnvEntry {
                    key,
                    value: match value {
                        serde_json::Value::String(text) => text,
                        serde_json::Value::Null => String::new(),
                        other => other.to_string(),
                    },
                })
                .collect(),
        };
        Self { env }
    }
}

/// Collection request handed to the job backend. Limits are only written
/// when set to a non-zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub artifacts: Vec<String>,
    #[serde(default)]
    pub parameters: RequestParameters,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_loose_u64"
    )]
    pub ops_per_second: Option<u64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_loose_u64"
    )]
    pub timeout: Option<u64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_loose_u64"
    )]
    pub max_rows: Option<u64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_loose_u64"
    )]
    pub max_upload_bytes: Option<u64>,
}

impl Request {
    pub fn parameter_map(&self) -> ParameterMap {
        self.parameters
            .env
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

pub fn assemble_request(
    selection: &[ItemDescriptor],
    parameters: &ParameterMap,
    limits: &ResourceLimits,
) -> Request {
    Request {
        artifacts: selection.iter().map(|item| item.name.clone()).collect(),
        parameters: RequestParameters {
            env: parameters
                .iter()
                .map(|(key, value)| EnvEntry {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        },
        ops_per_second: non_zero(limits.ops_per_second),
        timeout: non_zero(limits.timeout),
        max_rows: non_zero(limits.max_rows),
        max_upload_bytes: non_zero(limits.max_mbytes)
            .map(|mbytes| mbytes.saturating_mul(BYTES_PER_MEGABYTE)),
    }
}

fn non_zero(value: Option<u64>) -> Option<u64> {
    value.filter(|value| *value != 0)
}
