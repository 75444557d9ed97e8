//! Catalog comparator shared by the integration tests.
//!
//! An [`ExpectedAssertion`] names a resource and a subset of its
//! properties, tags and edges. [`matches`] is true when some planned
//! assertion carries at least everything expected.

#![allow(dead_code)]

use std::collections::BTreeMap;

use octavia_planner::{
    EdgeKind, OsFamily, PropertyValue, ResourceAssertion, ResourceKind, ResourceRef,
};

/// Partial description of a resource assertion
#[derive(Debug, Clone)]
pub struct ExpectedAssertion {
    kind: ResourceKind,
    name: String,
    properties: BTreeMap<String, PropertyValue>,
    tags: Vec<String>,
    edges: Vec<(EdgeKind, ResourceRef)>,
}

impl ExpectedAssertion {
    pub fn new(kind: ResourceKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            properties: BTreeMap::new(),
            tags: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn package(name: &str) -> Self {
        Self::new(ResourceKind::Package, name)
    }

    pub fn service(name: &str) -> Self {
        Self::new(ResourceKind::Service, name)
    }

    pub fn class(name: &str) -> Self {
        Self::new(ResourceKind::Class, name)
    }

    /// Config entry `key` whose `value` property equals `value`.
    pub fn config(key: &str, value: &str) -> Self {
        Self::new(ResourceKind::ConfigEntry, key).with("value", value)
    }

    pub fn with(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn tagged(mut self, tags: &[&str]) -> Self {
        self.tags.extend(tags.iter().map(|t| t.to_string()));
        self
    }

    pub fn subscribes_to(mut self, target: ResourceRef) -> Self {
        self.edges.push((EdgeKind::Subscribe, target));
        self
    }

    pub fn notifies(mut self, target: ResourceRef) -> Self {
        self.edges.push((EdgeKind::Notify, target));
        self
    }

    pub fn requires(mut self, target: ResourceRef) -> Self {
        self.edges.push((EdgeKind::Require, target));
        self
    }

    fn matched_by(&self, actual: &ResourceAssertion) -> bool {
        actual.kind() == self.kind
            && actual.name() == self.name
            && self
                .properties
                .iter()
                .all(|(k, v)| actual.property(k) == Some(v))
            && self.tags.iter().all(|t| actual.tags().contains(t))
            && self.edges.iter().all(|(kind, target)| {
                actual
                    .edges()
                    .iter()
                    .any(|e| e.kind == *kind && e.target == *target)
            })
    }
}

/// True when some assertion in `actual` satisfies `expected`.
pub fn matches(actual: &[ResourceAssertion], expected: &ExpectedAssertion) -> bool {
    actual.iter().any(|a| expected.matched_by(a))
}

/// Assert with a readable catalog dump on failure.
pub fn assert_contains(actual: &[ResourceAssertion], expected: &ExpectedAssertion) {
    assert!(
        matches(actual, expected),
        "expected {:?} in catalog:\n{}",
        expected,
        actual
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Package and service names each platform is expected to use.
pub fn platform_params(family: OsFamily) -> (&'static str, &'static str) {
    match family {
        OsFamily::Debian => ("octavia-api", "octavia-api"),
        OsFamily::RedHat => ("openstack-octavia-api", "octavia-api"),
    }
}
