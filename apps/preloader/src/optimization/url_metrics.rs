use serde::{Deserialize, Serialize};

/// An element observed while a real visitor loaded the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementMetric {
    pub xpath: String,
    #[serde(default)]
    pub is_lcp: bool,
}

/// One real-user page load: the viewport it was measured at and the
/// elements it reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMetric {
    pub viewport_width: u32,
    #[serde(default)]
    pub elements: Vec<ElementMetric>,
}

impl UrlMetric {
    /// XPath of the first element this load flagged as LCP.
    pub fn lcp_xpath(&self) -> Option<&str> {
        self.elements
            .iter()
            .find(|element| element.is_lcp)
            .map(|element| element.xpath.as_str())
    }
}
