//! Wire models for the `/api/analyze` exchange.

use serde::{Deserialize, Deserializer, Serialize};

/// Search form contents, trimmed. Built fresh for every submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub query: String,
    pub organism: String,
    pub focus: String,
}

impl Query {
    /// Build a query from raw form field values, trimming each one.
    pub fn from_form(query: &str, organism: &str, focus: &str) -> Self {
        Self {
            query: query.trim().to_string(),
            organism: organism.trim().to_string(),
            focus: focus.trim().to_string(),
        }
    }

    /// Only the query text is required; organism and focus may be empty.
    pub fn is_valid(&self) -> bool {
        !self.query.is_empty()
    }
}

/// Successful response payload of the analysis endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub hypotheses: Vec<Hypothesis>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub interpretation: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<AnalysisMeta>,
}

/// One UniProt record as summarised by the analysis service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub accession: String,
    #[serde(default)]
    pub protein_name: Option<String>,
    #[serde(default)]
    pub organism: Option<String>,
    #[serde(default)]
    pub gene: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
}

/// Identifiers may arrive as `null`; they decode as empty strings.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub statement: String,
    pub rationale: String,
}

/// A suggested follow-up action and the data it depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub task: String,
    pub data_needed: String,
}

/// Echo of the request as seen by the service. Logged, never rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisMeta {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub organism: String,
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub requestor: Option<String>,
}

/// Body of a non-2xx response. `detail` is usually a string but some
/// services put structured validation errors there.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorPayload {
    pub fn detail_text(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(|d| d.as_str())
            .filter(|d| !d.is_empty())
    }
}
