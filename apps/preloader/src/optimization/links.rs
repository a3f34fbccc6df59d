//! Link collection: resource hints scoped to viewport width ranges.
//!
//! Visitors add links with the viewport range they apply to. Before rendering,
//! links with identical attributes whose ranges overlap or touch are merged,
//! and each range is turned into media features on the `media` attribute.
#![allow(dead_code)]

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::builder::breakpoints::UNBOUNDED_WIDTH;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("Link is missing the rel attribute")]
    MissingRel,

    #[error("Link needs an href or imagesrcset attribute")]
    MissingHref,

    #[error("Maximum viewport width {maximum} is below minimum viewport width {minimum}")]
    InvalidRange { minimum: u32, maximum: u32 },
}

/// Link attributes in insertion order. Setting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkAttributes(Vec<(String, String)>);

impl LinkAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: &str) {
        match self.0.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing_value)) => *existing_value = value.to_string(),
            None => self.0.push((name.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn has_non_empty(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| !value.is_empty())
    }
}

impl Serialize for LinkAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Link {
    pub attributes: LinkAttributes,
    pub minimum_viewport_width: u32,
    pub maximum_viewport_width: u32,
}

impl Link {
    /// Attributes as rendered: the viewport range appended to `media`.
    fn rendered_attributes(&self) -> LinkAttributes {
        let mut features = Vec::new();
        if self.minimum_viewport_width > 0 {
            features.push(format!("(min-width: {}px)", self.minimum_viewport_width));
        }
        if self.maximum_viewport_width != UNBOUNDED_WIDTH {
            features.push(format!("(max-width: {}px)", self.maximum_viewport_width));
        }

        let mut attributes = self.attributes.clone();
        if !features.is_empty() {
            let features = features.join(" and ");
            let media = match attributes.get("media") {
                Some(media) if !media.is_empty() => format!("{media} and {features}"),
                _ => features,
            };
            attributes.set("media", &media);
        }
        attributes
    }
}

#[derive(Debug, Clone, Default)]
pub struct LinkCollection {
    links: Vec<Link>,
}

impl LinkCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_link(
        &mut self,
        attributes: LinkAttributes,
        minimum_viewport_width: u32,
        maximum_viewport_width: u32,
    ) -> Result<(), LinkError> {
        if !attributes.has_non_empty("rel") {
            return Err(LinkError::MissingRel);
        }
        if !attributes.has_non_empty("href") && !attributes.has_non_empty("imagesrcset") {
            return Err(LinkError::MissingHref);
        }
        if maximum_viewport_width < minimum_viewport_width {
            return Err(LinkError::InvalidRange {
                minimum: minimum_viewport_width,
                maximum: maximum_viewport_width,
            });
        }

        self.links.push(Link {
            attributes,
            minimum_viewport_width,
            maximum_viewport_width,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Links grouped by identical attributes (in order of first appearance),
    /// with overlapping or adjacent ranges merged.
    pub fn prepared_links(&self) -> Vec<Link> {
        let mut by_attributes: Vec<Vec<&Link>> = Vec::new();
        for link in &self.links {
            match by_attributes
                .iter_mut()
                .find(|group| group[0].attributes == link.attributes)
            {
                Some(group) => group.push(link),
                None => by_attributes.push(vec![link]),
            }
        }

        let mut prepared = Vec::with_capacity(self.links.len());
        for mut group in by_attributes {
            group.sort_by_key(|link| link.minimum_viewport_width);
            let mut merged: Vec<Link> = Vec::new();
            for link in group {
                match merged.last_mut() {
                    Some(last)
                        if last.maximum_viewport_width.saturating_add(1) >= link.minimum_viewport_width =>
                    {
                        last.maximum_viewport_width =
                            last.maximum_viewport_width.max(link.maximum_viewport_width);
                    }
                    _ => merged.push(link.clone()),
                }
            }
            prepared.extend(merged);
        }
        prepared
    }

    /// One `<link>` tag per prepared link, each followed by a newline.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for link in self.prepared_links() {
            html.push_str("<link");
            for (name, value) in link.rendered_attributes().iter() {
                html.push_str(&format!(" {name}=\"{}\"", escape_attribute(value)));
            }
            html.push_str(">\n");
        }
        html
    }

    /// Value for a `Link` response header, or `None` when there are no links.
    pub fn to_response_header(&self) -> Option<String> {
        let entries: Vec<String> = self
            .prepared_links()
            .iter()
            .filter_map(|link| {
                let attributes = link.rendered_attributes();
                let href = attributes.get("href")?;
                let mut entry = format!("<{}>", href.replace('<', "%3C").replace('>', "%3E"));
                for (name, value) in attributes.iter().filter(|(name, _)| *name != "href") {
                    entry.push_str(&format!("; {name}=\"{}\"", value.replace('"', "%22")));
                }
                Some(entry)
            })
            .collect();

        if entries.is_empty() {
            None
        } else {
            Some(entries.join(", "))
        }
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
