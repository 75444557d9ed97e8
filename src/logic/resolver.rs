//! Parameter resolver for the API role.
//!
//! Merges caller-supplied parameters with the documented defaults and the
//! per-platform package and service names.
//!
//! # Defaults
//!
//! | Parameter        | Default        |
//! |------------------|----------------|
//! | `enabled`        | `true`         |
//! | `manage_service` | `true`         |
//! | `package_ensure` | `latest`       |
//! | `bind_host`      | `0.0.0.0`      |
//! | `bind_port`      | `9876`         |
//! | `api_handler`    | unset (service default) |
//! | `sync_db`        | `false`        |
//!
//! Resolution is a pure function of its inputs: it fails before producing
//! anything if the platform is unknown or a supplied value is invalid.

use serde::Serialize;
use tracing::debug;

use crate::config_file::{PlatformFacts, RoleInput};
use crate::error::{PlannerError, Result};
use crate::platform::PlatformDefaults;
use crate::types::OsFamily;

pub const DEFAULT_PACKAGE_ENSURE: &str = "latest";
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
pub const DEFAULT_BIND_PORT: &str = "9876";

/// Fully resolved parameters for the API role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleParameters {
    pub os_family: OsFamily,
    pub package_name: String,
    pub service_name: String,
    pub enabled: bool,
    pub manage_service: bool,
    pub package_ensure: String,
    pub bind_host: String,
    pub bind_port: String,
    /// `None` leaves the service's own handler in place
    pub api_handler: Option<String>,
    pub sync_db: bool,
}

impl RoleParameters {
    /// Documented defaults on the given platform.
    pub fn defaults_for(platform: &PlatformDefaults) -> Self {
        Self {
            os_family: platform.os_family,
            package_name: platform.package_name.to_string(),
            service_name: platform.service_name.to_string(),
            enabled: true,
            manage_service: true,
            package_ensure: DEFAULT_PACKAGE_ENSURE.to_string(),
            bind_host: DEFAULT_BIND_HOST.to_string(),
            bind_port: DEFAULT_BIND_PORT.to_string(),
            api_handler: None,
            sync_db: false,
        }
    }
}

/// Resolve `input` against the defaults for `os_family`.
pub fn resolve(input: &RoleInput, os_family: &str) -> Result<RoleParameters> {
    let platform = PlatformDefaults::lookup(os_family)?;
    validate(input)?;

    let mut params = RoleParameters::defaults_for(platform);
    if let Some(enabled) = input.enabled {
        params.enabled = enabled;
    }
    if let Some(manage_service) = input.manage_service {
        params.manage_service = manage_service;
    }
    if let Some(sync_db) = input.sync_db {
        params.sync_db = sync_db;
    }
    if let Some(ensure) = &input.package_ensure {
        params.package_ensure = ensure.trim().to_string();
    }
    if let Some(host) = &input.bind_host {
        params.bind_host = host.clone();
    }
    if let Some(port) = &input.bind_port {
        params.bind_port = port.clone();
    }
    params.api_handler = input.api_handler.clone();

    debug!(
        os_family = %params.os_family,
        package = %params.package_name,
        service = %params.service_name,
        "resolved API role parameters"
    );
    Ok(params)
}

/// Resolve using a facts record instead of a bare family name.
pub fn resolve_with_facts(input: &RoleInput, facts: &PlatformFacts) -> Result<RoleParameters> {
    resolve(input, &facts.os_family)
}

fn validate(input: &RoleInput) -> Result<()> {
    if let Some(port) = &input.bind_port {
        validate_port(port)?;
    }
    if let Some(host) = &input.bind_host {
        if host.is_empty() {
            return Err(PlannerError::invalid_parameter("bind_host", "must not be empty"));
        }
        if host.chars().any(char::is_whitespace) {
            return Err(PlannerError::invalid_parameter(
                "bind_host",
                format!("'{host}' contains whitespace"),
            ));
        }
    }
    if let Some(ensure) = &input.package_ensure {
        if ensure.trim().is_empty() {
            return Err(PlannerError::invalid_parameter(
                "package_ensure",
                "must not be empty",
            ));
        }
    }
    if let Some(handler) = &input.api_handler {
        if handler.trim().is_empty() {
            return Err(PlannerError::invalid_parameter(
                "api_handler",
                "must not be empty; leave it unset for the service default",
            ));
        }
    }
    Ok(())
}

/// Port must be a decimal string in 1..=65535.
fn validate_port(port: &str) -> Result<()> {
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PlannerError::invalid_parameter(
            "bind_port",
            format!("'{port}' is not a numeric string"),
        ));
    }
    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err(PlannerError::invalid_parameter(
            "bind_port",
            format!("'{port}' is outside 1-65535"),
        )),
        Ok(_) => Ok(()),
    }
}
