//! Parameter and facts files.
//!
//! Callers hand the planner partial parameter sets: every field is optional
//! and anything left out falls back to the documented default during
//! resolution. These types only carry what was supplied.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Caller-supplied parameters for the API role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manage_service: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_ensure: Option<String>,
    #[serde(default, alias = "host", skip_serializing_if = "Option::is_none")]
    pub bind_host: Option<String>,
    #[serde(default, alias = "port", skip_serializing_if = "Option::is_none")]
    pub bind_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_handler: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_db: Option<bool>,
}

impl RoleInput {
    /// Create an empty input; every field resolves to its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Load parameters from a JSON file
    ///
    /// A missing file is [`PlannerError::Io`]; malformed JSON or unknown
    /// keys are [`PlannerError::Json`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let input: Self = serde_json::from_str(&content)?;
        Ok(input)
    }

    /// Save parameters to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Apply a single `key=value` override, as given on the command line.
    ///
    /// Accepts the same keys (and `host`/`port` aliases) as the JSON form.
    pub fn apply_override(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            PlannerError::invalid_parameter(assignment, "expected key=value")
        })?;
        let key = key.trim();
        let value = value.trim();

        match key {
            "enabled" => self.enabled = Some(parse_bool(key, value)?),
            "manage_service" => self.manage_service = Some(parse_bool(key, value)?),
            "sync_db" => self.sync_db = Some(parse_bool(key, value)?),
            "package_ensure" => self.package_ensure = Some(value.to_string()),
            "bind_host" | "host" => self.bind_host = Some(value.to_string()),
            "bind_port" | "port" => self.bind_port = Some(value.to_string()),
            "api_handler" => self.api_handler = Some(value.to_string()),
            _ => return Err(PlannerError::invalid_parameter(key, "unknown parameter")),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" => Ok(true),
        "false" | "no" => Ok(false),
        _ => Err(PlannerError::invalid_parameter(
            key,
            format!("expected a boolean, got '{value}'"),
        )),
    }
}

/// Environment-discovered attributes of the target host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformFacts {
    #[serde(rename = "osfamily", alias = "os_family")]
    pub os_family: String,
    /// Remaining facts are carried through but do not affect planning
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl PlatformFacts {
    pub fn new(os_family: impl Into<String>) -> Self {
        Self {
            os_family: os_family.into(),
            other: BTreeMap::new(),
        }
    }

    /// Load facts from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Caller-supplied parameters for the PostgreSQL database role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseInput {
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileges: Option<String>,
}

impl DatabaseInput {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            ..Self::default()
        }
    }
}
