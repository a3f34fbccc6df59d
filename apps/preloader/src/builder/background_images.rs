//! Background image variants of a layout element.
//!
//! A page-builder element may set a default background image plus one override
//! per responsive breakpoint. Each configured image becomes a [`BackgroundImage`]
//! carrying the viewport width range in which the builder's CSS would show it.
//!
//! # Range rules
//! - the default image covers `[0, UNBOUNDED_WIDTH]`
//! - a breakpoint image covers `[breakpoint.value, next.value - 1]`, where `next`
//!   is the next breakpoint that also has an image; the last one is unbounded
//! - breakpoints without an image produce nothing and are absorbed by the
//!   preceding breakpoint image's range

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builder::breakpoints::{ActiveBreakpoints, UNBOUNDED_WIDTH};
use crate::builder::elements::{find_element_by_id, setting_url};
use crate::builder::site::DocumentProvider;

const BACKGROUND_IMAGE_KEY: &str = "background_image";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundImage {
    pub src: String,
    pub min_width: u32,
    pub max_width: u32,
}

/// Resolves `element_id` in the provider's current document and extracts its
/// background image variants. Unresolvable documents or elements yield an
/// empty list.
pub fn get_element_background_images(
    documents: &dyn DocumentProvider,
    element_id: &str,
) -> Vec<BackgroundImage> {
    let Some(elements) = documents.current_elements() else {
        debug!("No current document; element {element_id} has no background images");
        return Vec::new();
    };

    let Some(element) = find_element_by_id(elements, element_id) else {
        debug!("Element {element_id} not found in current document");
        return Vec::new();
    };

    extract_background_images(&element.settings, documents.active_breakpoints())
}

/// Derives the ordered variant list from an element's settings.
pub fn extract_background_images(
    settings: &serde_json::Map<String, serde_json::Value>,
    breakpoints: &ActiveBreakpoints,
) -> Vec<BackgroundImage> {
    let mut images = Vec::new();

    if let Some(src) = setting_url(settings, BACKGROUND_IMAGE_KEY) {
        images.push(BackgroundImage {
            src: src.to_string(),
            min_width: 0,
            max_width: UNBOUNDED_WIDTH,
        });
    }

    let defined: Vec<(u32, &str)> = breakpoints
        .as_slice()
        .iter()
        .filter_map(|breakpoint| {
            let key = format!("{BACKGROUND_IMAGE_KEY}_{}", breakpoint.name);
            setting_url(settings, &key).map(|src| (breakpoint.value, src))
        })
        .collect();

    for (i, (min_width, src)) in defined.iter().enumerate() {
        let max_width = match defined.get(i + 1) {
            Some((next_value, _)) => next_value - 1,
            None => UNBOUNDED_WIDTH,
        };
        images.push(BackgroundImage {
            src: src.to_string(),
            min_width: *min_width,
            max_width,
        });
    }

    images
}

impl BackgroundImage {
    /// Whether this variant should be preloaded for a viewport group spanning
    /// `[group_min, group_max]`.
    ///
    /// Lower bound at or above the group's lower bound, upper bound at or above
    /// the group's upper bound. This is not a containment test.
    pub fn qualifies_for(&self, group_min: u32, group_max: u32) -> bool {
        self.min_width >= group_min && self.max_width >= group_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::breakpoints::Breakpoint;
    use crate::builder::elements::ElementData;
    use serde_json::{json, Map, Value};

    fn settings(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn image(src: &str, min_width: u32, max_width: u32) -> BackgroundImage {
        BackgroundImage {
            src: src.to_string(),
            min_width,
            max_width,
        }
    }

    fn three_breakpoints() -> ActiveBreakpoints {
        ActiveBreakpoints::from_config(vec![
            Breakpoint::new("tablet", 768),
            Breakpoint::new("laptop", 1025),
            Breakpoint::new("desktop", 1440),
        ])
    }

    struct FixtureDocuments {
        elements: Option<Vec<ElementData>>,
        breakpoints: ActiveBreakpoints,
    }

    impl DocumentProvider for FixtureDocuments {
        fn current_elements(&self) -> Option<&[ElementData]> {
            self.elements.as_deref()
        }

        fn active_breakpoints(&self) -> &ActiveBreakpoints {
            &self.breakpoints
        }
    }

    #[test]
    fn test_single_breakpoint() {
        let s = settings(json!({
            "background_image": { "url": "a.jpg" },
            "background_image_tablet": { "url": "b.jpg" }
        }));
        let breakpoints = ActiveBreakpoints::from_config(vec![Breakpoint::new("tablet", 768)]);

        let images = extract_background_images(&s, &breakpoints);
        assert_eq!(
            images,
            vec![image("a.jpg", 0, UNBOUNDED_WIDTH), image("b.jpg", 768, UNBOUNDED_WIDTH)]
        );
    }

    #[test]
    fn test_skipped_middle_breakpoint_is_absorbed() {
        let s = settings(json!({
            "background_image": { "url": "default.jpg" },
            "background_image_tablet": { "url": "tablet.jpg" },
            "background_image_desktop": { "url": "desktop.jpg" }
        }));

        let images = extract_background_images(&s, &three_breakpoints());
        assert_eq!(
            images,
            vec![
                image("default.jpg", 0, UNBOUNDED_WIDTH),
                image("tablet.jpg", 768, 1439),
                image("desktop.jpg", 1440, UNBOUNDED_WIDTH),
            ]
        );
    }

    #[test]
    fn test_all_breakpoints_defined() {
        let s = settings(json!({
            "background_image_tablet": { "url": "t.jpg" },
            "background_image_laptop": { "url": "l.jpg" },
            "background_image_desktop": { "url": "d.jpg" }
        }));

        let images = extract_background_images(&s, &three_breakpoints());
        assert_eq!(
            images,
            vec![
                image("t.jpg", 768, 1024),
                image("l.jpg", 1025, 1439),
                image("d.jpg", 1440, UNBOUNDED_WIDTH),
            ]
        );
    }

    #[test]
    fn test_breakpoint_variants_never_overlap() {
        let s = settings(json!({
            "background_image": { "url": "x.jpg" },
            "background_image_mobile": { "url": "m.jpg" },
            "background_image_laptop": { "url": "l.jpg" },
            "background_image_widescreen": { "url": "w.jpg" }
        }));
        let breakpoints = ActiveBreakpoints::from_config(vec![
            Breakpoint::new("mobile", 360),
            Breakpoint::new("tablet", 768),
            Breakpoint::new("laptop", 1025),
            Breakpoint::new("desktop", 1440),
            Breakpoint::new("widescreen", 2400),
        ]);

        let images = extract_background_images(&s, &breakpoints);
        let scoped: Vec<&BackgroundImage> = images.iter().skip(1).collect();
        assert_eq!(scoped.len(), 3);
        for pair in scoped.windows(2) {
            assert!(pair[0].min_width <= pair[0].max_width);
            assert_eq!(
                pair[0].max_width + 1,
                pair[1].min_width,
                "ranges must touch without overlapping: {:?}",
                pair
            );
        }
        assert_eq!(scoped.last().unwrap().max_width, UNBOUNDED_WIDTH);
    }

    #[test]
    fn test_shared_breakpoint_value_yields_one_variant() {
        let s = settings(json!({
            "background_image_tablet": { "url": "t.jpg" },
            "background_image_tablet_extra": { "url": "te.jpg" }
        }));
        let breakpoints = ActiveBreakpoints::from_config(vec![
            Breakpoint::new("tablet", 768),
            Breakpoint::new("tablet_extra", 768),
        ]);

        let images = extract_background_images(&s, &breakpoints);
        assert_eq!(images, vec![image("t.jpg", 768, UNBOUNDED_WIDTH)]);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let s = settings(json!({
            "background_image": { "url": "a.jpg" },
            "background_image_laptop": { "url": "b.jpg" }
        }));
        let first = extract_background_images(&s, &three_breakpoints());
        let second = extract_background_images(&s, &three_breakpoints());
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_settings_no_images() {
        let images = extract_background_images(&Map::new(), &three_breakpoints());
        assert!(images.is_empty());
    }

    #[test]
    fn test_absent_element_yields_empty() {
        let documents = FixtureDocuments {
            elements: Some(
                serde_json::from_value(json!([
                    { "id": "abc", "settings": { "background_image": { "url": "a.jpg" } } }
                ]))
                .unwrap(),
            ),
            breakpoints: three_breakpoints(),
        };
        assert!(get_element_background_images(&documents, "missing").is_empty());
        assert_eq!(
            get_element_background_images(&documents, "abc"),
            vec![image("a.jpg", 0, UNBOUNDED_WIDTH)]
        );
    }

    #[test]
    fn test_missing_document_yields_empty() {
        let documents = FixtureDocuments {
            elements: None,
            breakpoints: three_breakpoints(),
        };
        assert!(get_element_background_images(&documents, "abc").is_empty());
    }

    #[test]
    fn test_qualification_is_asymmetric() {
        let tablet = image("b.jpg", 768, 1023);
        assert!(tablet.qualifies_for(768, 1023));
        assert!(!tablet.qualifies_for(768, 1200));
        assert!(tablet.qualifies_for(600, 782));
        assert!(!tablet.qualifies_for(783, 1000));
    }
}
