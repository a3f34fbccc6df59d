//! Viewport groups: URL metrics bucketed by viewport width.
//!
//! Configured breakpoints are *maximum* widths. For `[480, 600, 782]` the groups are
//! `[0, 480]`, `[481, 600]`, `[601, 782]` and `[783, UNBOUNDED_WIDTH]`.
//!
//! Each group exposes the LCP element its visitors agreed on: the xpath reported
//! as LCP by the most URL metrics, ties going to the one seen first.
#![allow(dead_code)]

use serde::Serialize;
use thiserror::Error;

use crate::builder::breakpoints::UNBOUNDED_WIDTH;
use crate::optimization::url_metrics::UrlMetric;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupError {
    #[error("Viewport breakpoints must be non-zero, got {0}")]
    ZeroBreakpoint(u32),

    #[error("Viewport breakpoints must be strictly ascending: {previous} is followed by {next}")]
    NotAscending { previous: u32, next: u32 },

    #[error("Viewport breakpoint {0} leaves no room for a final group")]
    Unbounded(u32),
}

#[derive(Debug, Clone, Serialize)]
pub struct UrlMetricGroup {
    minimum_viewport_width: u32,
    maximum_viewport_width: u32,
    url_metrics: Vec<UrlMetric>,
    lcp_element_xpath: Option<String>,
}

impl UrlMetricGroup {
    fn new(minimum_viewport_width: u32, maximum_viewport_width: u32) -> Self {
        Self {
            minimum_viewport_width,
            maximum_viewport_width,
            url_metrics: Vec::new(),
            lcp_element_xpath: None,
        }
    }

    pub fn minimum_viewport_width(&self) -> u32 {
        self.minimum_viewport_width
    }

    pub fn maximum_viewport_width(&self) -> u32 {
        self.maximum_viewport_width
    }

    pub fn contains_width(&self, viewport_width: u32) -> bool {
        (self.minimum_viewport_width..=self.maximum_viewport_width).contains(&viewport_width)
    }

    pub fn url_metrics(&self) -> &[UrlMetric] {
        &self.url_metrics
    }

    pub fn lcp_element_xpath(&self) -> Option<&str> {
        self.lcp_element_xpath.as_deref()
    }

    fn compute_lcp_element(&mut self) {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for xpath in self.url_metrics.iter().filter_map(UrlMetric::lcp_xpath) {
            match counts.iter_mut().find(|(seen, _)| *seen == xpath) {
                Some((_, count)) => *count += 1,
                None => counts.push((xpath, 1)),
            }
        }

        // Keep the first of equally common xpaths.
        let mut best: Option<(&str, usize)> = None;
        for (xpath, count) in counts {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((xpath, count));
            }
        }
        self.lcp_element_xpath = best.map(|(xpath, _)| xpath.to_string());
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UrlMetricGroupCollection {
    groups: Vec<UrlMetricGroup>,
}

impl UrlMetricGroupCollection {
    pub fn new(breakpoints: &[u32], url_metrics: Vec<UrlMetric>) -> Result<Self, GroupError> {
        let mut groups = Vec::with_capacity(breakpoints.len() + 1);
        let mut minimum = 0u32;
        for (i, &maximum) in breakpoints.iter().enumerate() {
            if maximum == 0 {
                return Err(GroupError::ZeroBreakpoint(maximum));
            }
            if i > 0 && maximum <= breakpoints[i - 1] {
                return Err(GroupError::NotAscending {
                    previous: breakpoints[i - 1],
                    next: maximum,
                });
            }
            if maximum == UNBOUNDED_WIDTH {
                return Err(GroupError::Unbounded(maximum));
            }
            groups.push(UrlMetricGroup::new(minimum, maximum));
            minimum = maximum + 1;
        }
        groups.push(UrlMetricGroup::new(minimum, UNBOUNDED_WIDTH));

        for url_metric in url_metrics {
            if let Some(group) = groups
                .iter_mut()
                .find(|group| group.contains_width(url_metric.viewport_width))
            {
                group.url_metrics.push(url_metric);
            }
        }
        for group in &mut groups {
            group.compute_lcp_element();
        }

        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[UrlMetricGroup] {
        &self.groups
    }

    /// Groups whose LCP element is the element at `xpath`.
    pub fn groups_by_lcp_element<'a>(&'a self, xpath: &'a str) -> impl Iterator<Item = &'a UrlMetricGroup> + 'a {
        self.groups
            .iter()
            .filter(move |group| group.lcp_element_xpath() == Some(xpath))
    }
}
