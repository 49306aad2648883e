use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{PhasedLocus, ServiceRef};

pub const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub namespace: String,
    pub service: String,
    #[serde(default)]
    pub query_params: BTreeMap<String, String>,
}

impl SearchRequest {
    /// Request with no query parameters against `service`.
    pub fn for_service(service: &ServiceRef) -> Self {
        Self {
            namespace: service.namespace.clone(),
            service: service.service.clone(),
            query_params: BTreeMap::new(),
        }
    }
}

/// Envelope of a completed search call.
///
/// `result` is kept as raw JSON: the row collection is its first element and
/// anything else in it is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub result: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchResponse {
    pub fn success(rows: Vec<Value>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            result: vec![Value::Array(rows)],
            message: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Rows of the first result element, in response order. A missing or
    /// non-array first element means zero rows.
    pub fn rows(&self) -> Vec<PhasedLocus> {
        match self.result.first() {
            Some(Value::Array(rows)) => rows.iter().map(PhasedLocus::from_value).collect(),
            _ => Vec::new(),
        }
    }
}

/// Body sent by the search service when it refuses or fails a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFailure {
    pub status: String,
    #[serde(default)]
    pub message: String,
}
