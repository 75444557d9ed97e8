//! Type-safe vocabulary for platforms and catalog resources
//!
//! Platform names and resource kinds are enums instead of strings so that
//! lookups are exhaustive and typos fail at parse time.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Operating system family, matched exactly against the `osfamily` fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum OsFamily {
    #[strum(serialize = "Debian")]
    Debian,
    #[strum(serialize = "RedHat")]
    RedHat,
}

/// Kind of resource a catalog assertion describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    #[strum(serialize = "Class")]
    Class,
    #[strum(serialize = "Anchor")]
    Anchor,
    #[strum(serialize = "Package")]
    Package,
    #[strum(serialize = "Octavia_config")]
    ConfigEntry,
    #[strum(serialize = "Service")]
    Service,
    /// Marker for the `db::sync` class; not a package or service
    #[strum(serialize = "DatabaseSync")]
    DatabaseSync,
    #[strum(serialize = "Postgresql::Server::Db")]
    PostgresDatabase,
}

/// Relationship from one assertion to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EdgeKind {
    /// Apply after the target and refresh when it changes
    Subscribe,
    /// Apply before the target and refresh it on change
    Notify,
    /// Apply after the target
    Require,
}

/// Desired run state of a managed service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ServiceEnsure {
    #[default]
    Running,
    Stopped,
}

impl ServiceEnsure {
    /// Running only when the service is both managed and enabled
    pub fn from_flags(manage_service: bool, enabled: bool) -> Self {
        if manage_service && enabled {
            Self::Running
        } else {
            Self::Stopped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_os_family_parse_is_exact() {
        assert_eq!("Debian".parse::<OsFamily>().unwrap(), OsFamily::Debian);
        assert_eq!("RedHat".parse::<OsFamily>().unwrap(), OsFamily::RedHat);
        assert!("redhat".parse::<OsFamily>().is_err());
        assert!("DEBIAN".parse::<OsFamily>().is_err());
        assert!(" RedHat ".parse::<OsFamily>().is_err());
        assert!("Solaris".parse::<OsFamily>().is_err());
    }

    #[test]
    fn test_os_family_display_matches_fact_value() {
        let names: Vec<String> = OsFamily::iter().map(|f| f.to_string()).collect();
        assert_eq!(names, vec!["Debian", "RedHat"]);
    }

    #[test]
    fn test_service_ensure_from_flags() {
        assert_eq!(ServiceEnsure::from_flags(true, true), ServiceEnsure::Running);
        assert_eq!(ServiceEnsure::from_flags(true, false), ServiceEnsure::Stopped);
        assert_eq!(ServiceEnsure::from_flags(false, true), ServiceEnsure::Stopped);
        assert_eq!(ServiceEnsure::from_flags(false, false), ServiceEnsure::Stopped);
        assert_eq!(ServiceEnsure::Running.to_string(), "running");
    }

    #[test]
    fn test_resource_kind_display() {
        assert_eq!(ResourceKind::ConfigEntry.to_string(), "Octavia_config");
        assert_eq!(ResourceKind::Package.to_string(), "Package");
    }
}
