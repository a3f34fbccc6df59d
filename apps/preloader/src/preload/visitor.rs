use tracing::{debug, warn};

use crate::builder::{get_element_background_images, DocumentProvider};
use crate::optimization::links::LinkAttributes;
use crate::optimization::visitor::{TagVisitor, TagVisitorContext};

/// Registry id of the background image preloader.
pub const VISITOR_ID: &str = "elementor-lcp-background-image-preloader";

/// Class the page builder puts on every layout element's wrapper.
pub const ELEMENT_CLASS: &str = "elementor-element";

/// Attribute carrying the layout element's id in the rendered markup.
pub const ELEMENT_ID_ATTRIBUTE: &str = "data-id";

/// Preloads the background image a viewport group's visitors saw as LCP.
pub struct BackgroundImagePreloader<'d> {
    documents: &'d dyn DocumentProvider,
}

impl<'d> BackgroundImagePreloader<'d> {
    pub fn new(documents: &'d dyn DocumentProvider) -> Self {
        Self { documents }
    }
}

impl TagVisitor for BackgroundImagePreloader<'_> {
    fn visit(&self, context: &mut TagVisitorContext<'_>) -> bool {
        let processor = context.processor;
        if !processor.has_class(ELEMENT_CLASS) {
            return false;
        }
        let Some(element_id) = processor
            .get_attribute(ELEMENT_ID_ATTRIBUTE)
            .filter(|id| !id.is_empty())
        else {
            return false;
        };

        let background_images = get_element_background_images(self.documents, element_id);
        let xpath = processor.get_xpath();
        let groups = context.url_metric_group_collection;

        for group in groups.groups_by_lcp_element(xpath) {
            let minimum = group.minimum_viewport_width();
            let maximum = group.maximum_viewport_width();

            for image in background_images
                .iter()
                .filter(|image| image.qualifies_for(minimum, maximum))
            {
                let attributes = LinkAttributes::new()
                    .with("rel", "preload")
                    .with("fetchpriority", "high")
                    .with("as", "image")
                    .with("href", &image.src)
                    .with("media", "screen");

                match context.link_collection.add_link(attributes, minimum, maximum) {
                    Ok(()) => debug!(
                        "Preloading {} for element {element_id} at {minimum}-{maximum}px",
                        image.src
                    ),
                    Err(e) => warn!("Skipped preload link for element {element_id}: {e}"),
                }
            }
        }

        // Track the element in URL metrics.
        true
    }
}
