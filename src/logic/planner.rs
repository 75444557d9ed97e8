//! Resource planner for the API role.
//!
//! Turns resolved parameters into an ordered catalog. The order is fixed:
//!
//! 1. Contained classes and the service anchors
//! 2. The API package
//! 3. `api_settings/*` config entries
//! 4. The API service, only when `manage_service` is set
//! 5. The database sync marker, only when `sync_db` is set
//!
//! Planning cannot fail; all validation happens during resolution.

use tracing::{debug, info};

use crate::catalog::{Catalog, ResourceAssertion, ResourceRef};
use crate::config_file::RoleInput;
use crate::error::Result;
use crate::logic::resolver::{resolve, RoleParameters};
use crate::platform::{anchors, classes, API_RESOURCE_TITLE, COMPONENT, SERVICE_DEFAULT};
use crate::types::{EdgeKind, ResourceKind, ServiceEnsure};

/// Auth strategy is fixed; the role always authenticates via keystone.
pub const AUTH_STRATEGY: &str = "keystone";

/// Config section holding every API setting.
const API_SECTION: &str = "api_settings";

/// Build the catalog for already-resolved parameters.
pub fn plan(params: &RoleParameters) -> Catalog {
    let mut catalog = Catalog::default();

    for class in classes::API_ROLE {
        catalog.push(ResourceAssertion::builder(ResourceKind::Class, *class).build());
    }
    let begin = ResourceAssertion::builder(ResourceKind::Anchor, anchors::SERVICE_BEGIN).build();
    let end = ResourceAssertion::builder(ResourceKind::Anchor, anchors::SERVICE_END).build();
    let (begin_ref, end_ref) = (begin.to_ref(), end.to_ref());
    catalog.push(begin);
    catalog.push(end);

    catalog.push(package(params));

    for entry in config_entries(params) {
        catalog.push(entry);
    }

    if params.manage_service {
        catalog.push(service(params, begin_ref, end_ref));
    } else {
        debug!("manage_service is false, no service resource planned");
    }

    if params.sync_db {
        catalog.push(ResourceAssertion::builder(ResourceKind::DatabaseSync, classes::DB_SYNC).build());
    }

    info!(
        resources = catalog.len(),
        os_family = %params.os_family,
        "planned API role catalog"
    );
    catalog
}

/// Resolve `input` for `os_family` and plan it in one step.
///
/// Nothing is planned if resolution fails.
pub fn plan_role(input: &RoleInput, os_family: &str) -> Result<Catalog> {
    let params = resolve(input, os_family)?;
    Ok(plan(&params))
}

fn package(params: &RoleParameters) -> ResourceAssertion {
    ResourceAssertion::builder(ResourceKind::Package, API_RESOURCE_TITLE)
        .property("ensure", params.package_ensure.as_str())
        .property("name", params.package_name.as_str())
        .tag("openstack")
        .tag(format!("{COMPONENT}-package"))
        .build()
}

fn config_entries(params: &RoleParameters) -> Vec<ResourceAssertion> {
    let handler = params.api_handler.as_deref().unwrap_or(SERVICE_DEFAULT);
    [
        ("bind_host", params.bind_host.as_str()),
        ("bind_port", params.bind_port.as_str()),
        ("auth_strategy", AUTH_STRATEGY),
        ("api_handler", handler),
    ]
    .into_iter()
    .map(|(key, value)| {
        ResourceAssertion::builder(ResourceKind::ConfigEntry, format!("{API_SECTION}/{key}"))
            .property("value", value)
            .build()
    })
    .collect()
}

/// The service is ordered between the two anchors it is handed.
fn service(params: &RoleParameters, begin: ResourceRef, end: ResourceRef) -> ResourceAssertion {
    let ensure = ServiceEnsure::from_flags(params.manage_service, params.enabled);
    ResourceAssertion::builder(ResourceKind::Service, API_RESOURCE_TITLE)
        .property("ensure", ensure.to_string())
        .property("name", params.service_name.as_str())
        .property("enable", params.enabled)
        .property("hasstatus", true)
        .property("hasrestart", true)
        .tag(format!("{COMPONENT}-service"))
        .tag(format!("{COMPONENT}-db-sync-service"))
        .edge(EdgeKind::Subscribe, begin)
        .edge(EdgeKind::Notify, end)
        .build()
}
