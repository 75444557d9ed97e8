//! Resource assertions and the catalog that holds them.
//!
//! A [`ResourceAssertion`] is built once through [`AssertionBuilder`] and is
//! read-only afterwards. A [`Catalog`] is the ordered output of a single
//! planning pass.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{EdgeKind, ResourceKind};

/// Value of an assertion property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Str(String),
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "'{s}'"),
        }
    }
}

/// Reference to another resource, rendered as `Kind[name]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub name: String,
}

impl ResourceRef {
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn anchor(name: impl Into<String>) -> Self {
        Self::new(ResourceKind::Anchor, name)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.kind, self.name)
    }
}

/// Directed ordering edge from the owning assertion to `target`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub kind: EdgeKind,
    pub target: ResourceRef,
}

/// A declarative statement about desired system state.
///
/// Properties are keyed by name in sorted order, not declaration order,
/// so a catalog renders and serializes identically however it was built.
/// Tags are likewise a sorted set. Edges keep declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAssertion {
    kind: ResourceKind,
    name: String,
    properties: BTreeMap<String, PropertyValue>,
    tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    edges: Vec<Edge>,
}

impl ResourceAssertion {
    /// Start building an assertion of `kind` titled `name`.
    pub fn builder(kind: ResourceKind, name: impl Into<String>) -> AssertionBuilder {
        AssertionBuilder {
            inner: ResourceAssertion {
                kind,
                name: name.into(),
                properties: BTreeMap::new(),
                tags: BTreeSet::new(),
                edges: Vec::new(),
            },
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &BTreeMap<String, PropertyValue> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Reference to this assertion for use as an edge target.
    pub fn to_ref(&self) -> ResourceRef {
        ResourceRef::new(self.kind, self.name.clone())
    }

    /// Targets this assertion subscribes to.
    pub fn subscribes_to(&self) -> impl Iterator<Item = &ResourceRef> {
        self.edges_of(EdgeKind::Subscribe)
    }

    /// Targets this assertion notifies.
    pub fn notifies(&self) -> impl Iterator<Item = &ResourceRef> {
        self.edges_of(EdgeKind::Notify)
    }

    fn edges_of(&self, kind: EdgeKind) -> impl Iterator<Item = &ResourceRef> {
        self.edges
            .iter()
            .filter(move |e| e.kind == kind)
            .map(|e| &e.target)
    }
}

impl fmt::Display for ResourceAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{ '{}':", self.kind, self.name)?;
        for (key, value) in &self.properties {
            writeln!(f, "  {key} => {value},")?;
        }
        if !self.tags.is_empty() {
            let tags: Vec<String> = self.tags.iter().map(|t| format!("'{t}'")).collect();
            writeln!(f, "  tag => [{}],", tags.join(", "))?;
        }
        for edge in &self.edges {
            writeln!(f, "  {} => {},", edge.kind, edge.target)?;
        }
        write!(f, "}}")
    }
}

/// Consuming builder for [`ResourceAssertion`]
#[derive(Debug)]
pub struct AssertionBuilder {
    inner: ResourceAssertion,
}

impl AssertionBuilder {
    pub fn property(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.inner.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.inner.tags.insert(tag.into());
        self
    }

    pub fn edge(mut self, kind: EdgeKind, target: ResourceRef) -> Self {
        self.inner.edges.push(Edge { kind, target });
        self
    }

    pub fn build(self) -> ResourceAssertion {
        self.inner
    }
}

/// Ordered result of one planning pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    resources: Vec<ResourceAssertion>,
}

impl Catalog {
    pub(crate) fn push(&mut self, assertion: ResourceAssertion) {
        self.resources.push(assertion);
    }

    pub fn resources(&self) -> &[ResourceAssertion] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceAssertion> {
        self.resources.iter()
    }

    /// Find the assertion with the given kind and title.
    pub fn find(&self, kind: ResourceKind, name: &str) -> Option<&ResourceAssertion> {
        self.resources
            .iter()
            .find(|r| r.kind == kind && r.name == name)
    }

    /// All assertions of one kind, in catalog order.
    pub fn of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &ResourceAssertion> {
        self.resources.iter().filter(move |r| r.kind == kind)
    }

    pub fn count(&self, kind: ResourceKind) -> usize {
        self.of_kind(kind).count()
    }

    pub fn contains(&self, kind: ResourceKind, name: &str) -> bool {
        self.find(kind, name).is_some()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ResourceAssertion;
    type IntoIter = std::slice::Iter<'a, ResourceAssertion>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, resource) in self.resources.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{resource}")?;
        }
        Ok(())
    }
}
