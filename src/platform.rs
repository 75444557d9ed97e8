//! Per-platform defaults and fixed resource names.
//!
//! Package and service names differ between distribution families. They
//! live in a static lookup keyed by [`OsFamily`] so every supported family
//! has exactly one entry, checked exhaustively at compile time.
//!
//! | OS family | API package              | API service   |
//! |-----------|--------------------------|---------------|
//! | Debian    | `octavia-api`            | `octavia-api` |
//! | RedHat    | `openstack-octavia-api`  | `octavia-api` |

use serde::Serialize;

use crate::error::{PlannerError, Result};
use crate::types::OsFamily;

/// Component every resource name and tag is prefixed with.
pub const COMPONENT: &str = "octavia";

/// Value written for config keys the caller left unset, telling the
/// service to keep its own built-in default.
pub const SERVICE_DEFAULT: &str = "<SERVICE DEFAULT>";

/// Classes the API role always contains.
pub mod classes {
    pub const DEPS: &str = "octavia::deps";
    pub const PARAMS: &str = "octavia::params";
    pub const POLICY: &str = "octavia::policy";
    pub const AUTHTOKEN: &str = "octavia::keystone::authtoken";
    pub const DB_SYNC: &str = "octavia::db::sync";

    /// Contained by the API role, in declaration order.
    pub const API_ROLE: &[&str] = &[DEPS, PARAMS, POLICY, AUTHTOKEN];
}

/// Ordering anchors declared by the deps class.
pub mod anchors {
    pub const SERVICE_BEGIN: &str = "octavia::service::begin";
    pub const SERVICE_END: &str = "octavia::service::end";
    pub const DB_BEGIN: &str = "octavia::db::begin";
    pub const DB_END: &str = "octavia::db::end";
}

/// Title of the API package and service resources, independent of the
/// platform-specific `name` property.
pub const API_RESOURCE_TITLE: &str = "octavia-api";

/// Platform-specific names for the API role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformDefaults {
    pub os_family: OsFamily,
    pub package_name: &'static str,
    pub service_name: &'static str,
}

impl PlatformDefaults {
    /// Get the static defaults for a known family.
    pub fn for_family(os_family: OsFamily) -> &'static PlatformDefaults {
        match os_family {
            OsFamily::Debian => &DEBIAN,
            OsFamily::RedHat => &REDHAT,
        }
    }

    /// Look up defaults by the raw `osfamily` fact value.
    ///
    /// The value must match exactly (`Debian`, `RedHat`). Fails with
    /// [`PlannerError::UnsupportedPlatform`] for anything else.
    pub fn lookup(os_family: &str) -> Result<&'static PlatformDefaults> {
        let family: OsFamily = os_family
            .parse()
            .map_err(|_| PlannerError::unsupported_platform(os_family))?;
        Ok(Self::for_family(family))
    }
}

static DEBIAN: PlatformDefaults = PlatformDefaults {
    os_family: OsFamily::Debian,
    package_name: "octavia-api",
    service_name: "octavia-api",
};

static REDHAT: PlatformDefaults = PlatformDefaults {
    os_family: OsFamily::RedHat,
    package_name: "openstack-octavia-api",
    service_name: "octavia-api",
};
