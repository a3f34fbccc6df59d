//! Tag visitors: per-element hooks run during a render's tag walk.
//!
//! Each visited tag is offered to every registered visitor. A visitor may add
//! links to the render's [`LinkCollection`] and returns whether the tag should
//! be tracked in future URL metrics.
#![allow(dead_code)]

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::optimization::groups::UrlMetricGroupCollection;
use crate::optimization::links::LinkCollection;

/// Read access to the tag currently being visited.
pub trait TagProcessor {
    fn has_class(&self, name: &str) -> bool;

    fn get_attribute(&self, name: &str) -> Option<&str>;

    fn get_xpath(&self) -> &str;
}

/// A tag captured from the rendered markup: its xpath and attributes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagSnapshot {
    pub xpath: String,
    /// Keyed by lowercased attribute name.
    #[serde(default, deserialize_with = "deserialize_attributes")]
    pub attributes: BTreeMap<String, String>,
}

/// Attribute names are case-insensitive, so keys are lowercased. A `true` value
/// is a boolean attribute and reads as empty; other non-string values are dropped.
fn deserialize_attributes<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(name, value)| {
            let value = match value {
                Value::String(value) => value,
                Value::Bool(true) => String::new(),
                _ => return None,
            };
            Some((name.to_ascii_lowercase(), value))
        })
        .collect())
}

impl TagProcessor for TagSnapshot {
    fn has_class(&self, name: &str) -> bool {
        self.get_attribute("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|class| class == name))
    }

    fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn get_xpath(&self) -> &str {
        &self.xpath
    }
}

pub struct TagVisitorContext<'a> {
    pub processor: &'a dyn TagProcessor,
    pub url_metric_group_collection: &'a UrlMetricGroupCollection,
    pub link_collection: &'a mut LinkCollection,
}

pub trait TagVisitor {
    /// Returns whether the tag should be tracked in URL metrics.
    fn visit(&self, context: &mut TagVisitorContext<'_>) -> bool;
}

impl<F> TagVisitor for F
where
    F: Fn(&mut TagVisitorContext<'_>) -> bool,
{
    fn visit(&self, context: &mut TagVisitorContext<'_>) -> bool {
        self(context)
    }
}

#[derive(Default)]
pub struct TagVisitorRegistry<'v> {
    visitors: Vec<(String, Box<dyn TagVisitor + 'v>)>,
}

impl<'v> TagVisitorRegistry<'v> {
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Registers `visitor` under `id`, replacing any visitor already registered with that id.
    pub fn register(&mut self, id: &str, visitor: impl TagVisitor + 'v) {
        let visitor: Box<dyn TagVisitor + 'v> = Box::new(visitor);
        match self.visitors.iter_mut().find(|(existing, _)| existing == id) {
            Some((_, existing)) => *existing = visitor,
            None => self.visitors.push((id.to_string(), visitor)),
        }
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.visitors.iter().any(|(existing, _)| existing == id)
    }

    pub fn unregister(&mut self, id: &str) -> bool {
        let before = self.visitors.len();
        self.visitors.retain(|(existing, _)| existing != id);
        self.visitors.len() != before
    }

    /// Runs every visitor on the context's tag. All visitors run even once one
    /// has asked for tracking.
    pub fn visit(&self, context: &mut TagVisitorContext<'_>) -> bool {
        let mut tracked = false;
        for (_, visitor) in &self.visitors {
            tracked |= visitor.visit(context);
        }
        tracked
    }
}

/// Walks `tags` in document order and returns the xpaths of tracked tags.
pub fn walk_tags(
    registry: &TagVisitorRegistry<'_>,
    tags: &[TagSnapshot],
    url_metric_group_collection: &UrlMetricGroupCollection,
    link_collection: &mut LinkCollection,
) -> Vec<String> {
    let mut tracked_xpaths = Vec::new();
    for tag in tags {
        let mut context = TagVisitorContext {
            processor: tag,
            url_metric_group_collection,
            link_collection: &mut *link_collection,
        };
        if registry.visit(&mut context) {
            tracked_xpaths.push(tag.xpath.clone());
        }
    }
    debug!(
        "Tag walk visited {} tags, tracking {}",
        tags.len(),
        tracked_xpaths.len()
    );
    tracked_xpaths
}
