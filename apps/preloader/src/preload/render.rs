use serde::Serialize;
use tracing::info;

use crate::builder::DocumentProvider;
use crate::optimization::groups::{GroupError, UrlMetricGroupCollection};
use crate::optimization::links::{Link, LinkCollection};
use crate::optimization::url_metrics::UrlMetric;
use crate::optimization::visitor::{walk_tags, TagSnapshot, TagVisitorRegistry};
use crate::preload::meta::generator_meta_tag;
use crate::preload::visitor::{BackgroundImagePreloader, VISITOR_ID};

/// Outcome of one render's tag walk.
#[derive(Debug, Clone, Serialize)]
pub struct PreloadRender {
    pub links: Vec<Link>,
    pub tracked_xpaths: Vec<String>,
    /// Generator meta tag followed by the preload `<link>` tags, for the document head.
    pub html: String,
    pub link_header: Option<String>,
}

/// Runs the preloader over `tags` for one render.
///
/// Group and link collections are created here and never outlive the call.
pub fn render_preload_links(
    documents: &dyn DocumentProvider,
    viewport_breakpoints: &[u32],
    tags: &[TagSnapshot],
    url_metrics: Vec<UrlMetric>,
) -> Result<PreloadRender, GroupError> {
    let groups = UrlMetricGroupCollection::new(viewport_breakpoints, url_metrics)?;
    let mut link_collection = LinkCollection::new();

    let mut registry = TagVisitorRegistry::new();
    registry.register(VISITOR_ID, BackgroundImagePreloader::new(documents));

    let tracked_xpaths = walk_tags(&registry, tags, &groups, &mut link_collection);

    let mut html = generator_meta_tag();
    html.push_str(&link_collection.to_html());
    let links = link_collection.prepared_links();

    info!(
        "Render produced {} preload links for {} tracked elements",
        links.len(),
        tracked_xpaths.len()
    );

    Ok(PreloadRender {
        link_header: link_collection.to_response_header(),
        links,
        tracked_xpaths,
        html,
    })
}
