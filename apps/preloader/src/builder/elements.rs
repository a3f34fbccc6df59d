use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One node of a page-builder document: a section, column, container or widget.
///
/// Settings are kept as the builder stores them (an untyped JSON object);
/// typed reads go through [`setting_url`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementData {
    pub id: String,
    #[serde(default)]
    pub settings: Map<String, Value>,
    #[serde(default)]
    pub elements: Vec<ElementData>,
}

/// Depth-first, pre-order search for the element whose `id` equals `element_id`.
pub fn find_element_by_id<'a>(elements: &'a [ElementData], element_id: &str) -> Option<&'a ElementData> {
    for element in elements {
        if element.id == element_id {
            return Some(element);
        }
        if let Some(found) = find_element_by_id(&element.elements, element_id) {
            return Some(found);
        }
    }
    None
}

/// Reads `settings[key].url` as a non-empty string.
///
/// Anything else (missing key, `null`, a non-object media control, an empty
/// or non-string url) reads as `None`.
pub fn setting_url<'a>(settings: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    settings
        .get(key)
        .and_then(|control| control.get("url"))
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
}
