// Render-time optimization framework: URL metrics grouped by viewport,
// link collection for resource hints, and the tag visitor registry.

pub mod groups;
pub mod links;
pub mod url_metrics;
pub mod visitor;

