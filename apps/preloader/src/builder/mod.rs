// Page-builder document model: element trees, responsive breakpoints and the
// background image variants derived from element settings.

pub mod background_images;
pub mod breakpoints;
pub mod elements;
pub mod site;

pub use background_images::get_element_background_images;
pub use site::{DocumentProvider, SiteDocument, SiteStore};
