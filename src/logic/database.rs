//! PostgreSQL database role.
//!
//! Resolves the database name, owner and grant for the component's
//! database and plans a single database resource between the db anchors.
//! The password is never emitted in clear text: PostgreSQL's md5 scheme
//! stores `"md5" + hex(md5(password || user))`.

use md5::{Digest, Md5};
use serde::Serialize;
use tracing::info;

use crate::catalog::{Catalog, ResourceAssertion};
use crate::config_file::DatabaseInput;
use crate::error::{PlannerError, Result};
use crate::platform::{anchors, COMPONENT, SERVICE_DEFAULT};
use crate::types::{EdgeKind, ResourceKind};

pub const DEFAULT_PRIVILEGES: &str = "ALL";

/// Fully resolved parameters for the database role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseParameters {
    pub dbname: String,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub encoding: Option<String>,
    pub privileges: String,
}

impl DatabaseParameters {
    /// PostgreSQL md5 password hash for this user.
    pub fn password_hash(&self) -> String {
        postgresql_password(&self.user, &self.password)
    }
}

/// `md5` followed by the hex digest of the password salted with the user.
pub fn postgresql_password(user: &str, password: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(password.as_bytes());
    hasher.update(user.as_bytes());
    format!("md5{:x}", hasher.finalize())
}

/// Apply defaults to a database input and validate it.
pub fn resolve_database(input: &DatabaseInput) -> Result<DatabaseParameters> {
    if input.password.is_empty() {
        return Err(PlannerError::invalid_parameter("password", "must not be empty"));
    }

    let dbname = input.dbname.clone().unwrap_or_else(|| COMPONENT.to_string());
    let user = input.user.clone().unwrap_or_else(|| COMPONENT.to_string());
    validate_identifier("dbname", &dbname)?;
    validate_identifier("user", &user)?;

    let encoding = match &input.encoding {
        Some(e) if e.trim().is_empty() => {
            return Err(PlannerError::invalid_parameter("encoding", "must not be empty"));
        }
        Some(e) => Some(e.trim().to_string()),
        None => None,
    };

    let privileges = match &input.privileges {
        Some(p) if p.trim().is_empty() => {
            return Err(PlannerError::invalid_parameter("privileges", "must not be empty"));
        }
        Some(p) => p.trim().to_string(),
        None => DEFAULT_PRIVILEGES.to_string(),
    };

    Ok(DatabaseParameters {
        dbname,
        user,
        password: input.password.clone(),
        encoding,
        privileges,
    })
}

/// Plan the database between the `db::begin` and `db::end` anchors.
pub fn plan_database(params: &DatabaseParameters) -> Catalog {
    let mut catalog = Catalog::default();
    let begin = ResourceAssertion::builder(ResourceKind::Anchor, anchors::DB_BEGIN).build();
    let end = ResourceAssertion::builder(ResourceKind::Anchor, anchors::DB_END).build();
    let (begin_ref, end_ref) = (begin.to_ref(), end.to_ref());
    catalog.push(begin);
    catalog.push(end);

    let encoding = params.encoding.as_deref().unwrap_or(SERVICE_DEFAULT);
    catalog.push(
        ResourceAssertion::builder(ResourceKind::PostgresDatabase, params.dbname.as_str())
            .property("user", params.user.as_str())
            .property("password", params.password_hash())
            .property("grant", params.privileges.as_str())
            .property("encoding", encoding)
            .tag("openstack")
            .tag(format!("{COMPONENT}-db"))
            .edge(EdgeKind::Require, begin_ref)
            .edge(EdgeKind::Notify, end_ref)
            .build(),
    );

    info!(dbname = %params.dbname, user = %params.user, "planned PostgreSQL database");
    catalog
}

/// Resolve and plan the database role in one step.
pub fn plan_database_role(input: &DatabaseInput) -> Result<Catalog> {
    let params = resolve_database(input)?;
    Ok(plan_database(&params))
}

fn validate_identifier(name: &str, value: &str) -> Result<()> {
    let mut chars = value.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(PlannerError::invalid_parameter(
            name,
            format!("'{value}' is not a valid identifier"),
        ))
    }
}
