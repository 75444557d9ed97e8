//! Octavia role planner library
//!
//! Resolves role parameters against platform facts and plans the resulting
//! catalog of resource assertions for the Octavia API and database roles.

pub mod catalog;
pub mod cli;
pub mod config_file;
pub mod error;
pub mod logic;
pub mod platform;
pub mod types;

// Re-export main types for convenience
pub use catalog::{AssertionBuilder, Catalog, Edge, PropertyValue, ResourceAssertion, ResourceRef};
pub use config_file::{DatabaseInput, PlatformFacts, RoleInput};
pub use error::{PlannerError, Result};
pub use platform::{PlatformDefaults, SERVICE_DEFAULT};
pub use types::{EdgeKind, OsFamily, ResourceKind, ServiceEnsure};

pub use logic::database::{
    plan_database, plan_database_role, postgresql_password, resolve_database, DatabaseParameters,
};
pub use logic::planner::{plan, plan_role};
pub use logic::resolver::{resolve, resolve_with_facts, RoleParameters};
