#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// Upper bound used for ranges that extend to any viewport width.
pub const UNBOUNDED_WIDTH: u32 = u32::MAX;

/// A named responsive breakpoint as configured in the page builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub name: String,
    /// Pixel width at which this breakpoint's settings take over.
    pub value: u32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Breakpoint {
    pub fn new(name: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            value,
            enabled: true,
        }
    }
}

/// The enabled breakpoints of a site, sorted ascending by value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveBreakpoints(Vec<Breakpoint>);

impl ActiveBreakpoints {
    /// Drops disabled breakpoints and sorts the rest by value.
    /// Of several breakpoints sharing a value, only the first configured one is kept.
    pub fn from_config(breakpoints: Vec<Breakpoint>) -> Self {
        let mut active: Vec<Breakpoint> = breakpoints.into_iter().filter(|b| b.enabled).collect();
        active.sort_by_key(|b| b.value);
        active.dedup_by_key(|b| b.value);
        Self(active)
    }

    pub fn as_slice(&self) -> &[Breakpoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
