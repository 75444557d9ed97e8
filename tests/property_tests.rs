//! Property-Based Tests for the planner
//!
//! These tests verify:
//! - Resolution of empty input never fails on a supported platform
//! - Cardinality of package, service and db sync resources
//! - Config values pass supplied parameters through unchanged
//! - Enum string round-trips

use proptest::prelude::*;

use octavia_planner::{
    plan, plan_role, resolve, OsFamily, ResourceKind, RoleInput, SERVICE_DEFAULT,
};

/// Strategy for generating supported OS families
fn os_family_strategy() -> impl Strategy<Value = OsFamily> {
    prop_oneof![Just(OsFamily::Debian), Just(OsFamily::RedHat)]
}

/// Strategy for valid bind hosts: IPv4 literals and hostnames
fn bind_host_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255)
            .prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}")),
        "[a-z][a-z0-9-]{0,20}(\\.[a-z]{2,6})?",
    ]
}

/// Strategy for arbitrary valid role inputs
fn role_input_strategy() -> impl Strategy<Value = RoleInput> {
    (
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(prop_oneof![
            Just("latest".to_string()),
            Just("present".to_string()),
            Just("absent".to_string()),
            "[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}",
        ]),
        proptest::option::of(bind_host_strategy()),
        proptest::option::of((1u16..=u16::MAX).prop_map(|p| p.to_string())),
        proptest::option::of("[a-z_]{1,20}"),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(
            |(enabled, manage_service, package_ensure, bind_host, bind_port, api_handler, sync_db)| {
                RoleInput {
                    enabled,
                    manage_service,
                    package_ensure,
                    bind_host,
                    bind_port,
                    api_handler,
                    sync_db,
                }
            },
        )
}

fn config_value(catalog: &octavia_planner::Catalog, key: &str) -> Option<String> {
    catalog
        .find(ResourceKind::ConfigEntry, key)
        .and_then(|r| r.property("value"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

proptest! {
    /// Empty input resolves to the documented defaults on every platform
    #[test]
    fn empty_input_always_resolves(family in os_family_strategy()) {
        let params = resolve(&RoleInput::new(), &family.to_string());
        prop_assert!(params.is_ok());
        let params = params.unwrap();
        prop_assert!(params.enabled);
        prop_assert!(params.manage_service);
        prop_assert_eq!(params.package_ensure, "latest");
        prop_assert_eq!(params.bind_host, "0.0.0.0");
        prop_assert_eq!(params.bind_port, "9876");
    }

    /// Exactly one package, at most one service and one db sync marker
    #[test]
    fn plan_cardinality(input in role_input_strategy(), family in os_family_strategy()) {
        let catalog = plan_role(&input, &family.to_string()).unwrap();
        prop_assert_eq!(catalog.count(ResourceKind::Package), 1);
        prop_assert!(catalog.count(ResourceKind::Service) <= 1);
        prop_assert!(catalog.count(ResourceKind::DatabaseSync) <= 1);
    }

    /// manage_service=false never yields a service, whatever `enabled` is
    #[test]
    fn unmanaged_service_is_never_planned(
        input in role_input_strategy(),
        family in os_family_strategy(),
    ) {
        let input = RoleInput { manage_service: Some(false), ..input };
        let catalog = plan_role(&input, &family.to_string()).unwrap();
        prop_assert_eq!(catalog.count(ResourceKind::Service), 0);
    }

    /// DatabaseSync presence follows sync_db and nothing else
    #[test]
    fn db_sync_follows_flag(input in role_input_strategy(), family in os_family_strategy()) {
        let params = resolve(&input, &family.to_string()).unwrap();
        let catalog = plan(&params);
        prop_assert_eq!(catalog.count(ResourceKind::DatabaseSync) == 1, params.sync_db);
    }

    /// bind_host and bind_port are written verbatim
    #[test]
    fn bind_values_pass_through(
        host in bind_host_strategy(),
        port in 1u16..=u16::MAX,
        family in os_family_strategy(),
    ) {
        let input = RoleInput {
            bind_host: Some(host.clone()),
            bind_port: Some(port.to_string()),
            ..RoleInput::new()
        };
        let catalog = plan_role(&input, &family.to_string()).unwrap();
        prop_assert_eq!(config_value(&catalog, "api_settings/bind_host"), Some(host));
        prop_assert_eq!(config_value(&catalog, "api_settings/bind_port"), Some(port.to_string()));
    }

    /// An unset api_handler is the sentinel, never empty or missing
    #[test]
    fn unset_handler_is_sentinel(input in role_input_strategy(), family in os_family_strategy()) {
        let input = RoleInput { api_handler: None, ..input };
        let catalog = plan_role(&input, &family.to_string()).unwrap();
        prop_assert_eq!(
            config_value(&catalog, "api_settings/api_handler"),
            Some(SERVICE_DEFAULT.to_string())
        );
    }

    /// Non-numeric ports are always rejected
    #[test]
    fn non_numeric_port_rejected(port in "[0-9]{0,3}[a-z .:-][0-9a-z]{0,3}") {
        let input = RoleInput { bind_port: Some(port), ..RoleInput::new() };
        prop_assert!(resolve(&input, "Debian").is_err());
    }

    /// Unknown families are rejected
    #[test]
    fn unknown_family_rejected(family in "[A-Za-z]{1,12}") {
        prop_assume!(family != "Debian" && family != "RedHat");
        prop_assert!(resolve(&RoleInput::new(), &family).is_err());
    }

    /// OsFamily: to_string → parse round-trip is identity
    #[test]
    fn os_family_roundtrip(family in os_family_strategy()) {
        let parsed: OsFamily = family.to_string().parse().expect("Should parse");
        prop_assert_eq!(family, parsed);
    }
}
