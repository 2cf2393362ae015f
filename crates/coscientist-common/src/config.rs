//! Configuration loading for the Co-Scientist client.
//! Reads coscientist.toml from the current directory or the path in COSCIENTIST_CONFIG.
//! Every field has a default, so a missing file is not an error.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::error::{CoscientistError, Result};

pub const CONFIG_ENV_VAR: &str = "COSCIENTIST_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "coscientist.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub elements: ElementIds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_analyze_path")]
    pub analyze_path: String,
    #[serde(default = "default_health_path")]
    pub health_path: String,
    /// Unset means the request waits for the transport to resolve.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url()     -> String { "http://127.0.0.1:8000".to_string() }
fn default_analyze_path() -> String { "/api/analyze".to_string() }
fn default_health_path()  -> String { "/api/health".to_string() }

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            analyze_path: default_analyze_path(),
            health_path: default_health_path(),
            timeout_secs: None,
        }
    }
}

impl EndpointConfig {
    pub fn analyze_url(&self) -> Result<Url> {
        self.join(&self.analyze_path)
    }

    pub fn health_url(&self) -> Result<Url> {
        self.join(&self.health_path)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn join(&self, path: &str) -> Result<Url> {
        let base = Url::parse(&self.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(CoscientistError::Config(format!(
                "endpoint.base_url must be http or https, got {}",
                self.base_url
            )));
        }
        Ok(base.join(path)?)
    }
}

/// What to do with a response that resolves after a newer submission started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Every submission applies its result; the last one to resolve is visible.
    #[default]
    LastResponseWins,
    /// Results from superseded submissions are dropped.
    IgnoreStale,
}

impl OverlapPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlapPolicy::LastResponseWins => "last_response_wins",
            OverlapPolicy::IgnoreStale      => "ignore_stale",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionConfig {
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
}

/// Ids of the form, its fields, and the regions the client writes into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementIds {
    #[serde(default = "default_form_id")]
    pub form: String,
    #[serde(default = "default_query_id")]
    pub query: String,
    #[serde(default = "default_organism_id")]
    pub organism: String,
    #[serde(default = "default_focus_id")]
    pub focus: String,
    #[serde(default = "default_status_id")]
    pub status: String,
    #[serde(default = "default_summary_id")]
    pub summary: String,
    #[serde(default = "default_entries_id")]
    pub entries: String,
    #[serde(default = "default_hypotheses_id")]
    pub hypotheses: String,
    #[serde(default = "default_tasks_id")]
    pub tasks: String,
    #[serde(default = "default_interpretation_id")]
    pub interpretation: String,
}

fn default_form_id()           -> String { "query-form".to_string() }
fn default_query_id()          -> String { "query".to_string() }
fn default_organism_id()       -> String { "organism".to_string() }
fn default_focus_id()          -> String { "focus".to_string() }
fn default_status_id()         -> String { "status".to_string() }
fn default_summary_id()        -> String { "summary".to_string() }
fn default_entries_id()        -> String { "entries".to_string() }
fn default_hypotheses_id()     -> String { "hypotheses".to_string() }
fn default_tasks_id()          -> String { "tasks".to_string() }
fn default_interpretation_id() -> String { "interpretation".to_string() }

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            form: default_form_id(),
            query: default_query_id(),
            organism: default_organism_id(),
            focus: default_focus_id(),
            status: default_status_id(),
            summary: default_summary_id(),
            entries: default_entries_id(),
            hypotheses: default_hypotheses_id(),
            tasks: default_tasks_id(),
            interpretation: default_interpretation_id(),
        }
    }
}

impl ElementIds {
    /// The four list regions, in render order.
    pub fn list_regions(&self) -> [&str; 4] {
        [
            self.entries.as_str(),
            self.hypotheses.as_str(),
            self.tasks.as_str(),
            self.interpretation.as_str(),
        ]
    }
}

impl ClientConfig {
    /// Load configuration from coscientist.toml.
    /// Checks COSCIENTIST_CONFIG env var first, then current directory.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load from an explicit path, falling back to defaults when the file is absent.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ClientConfig = toml::from_str(content)?;
        config.endpoint.analyze_url()?;
        Ok(config)
    }
}
