// Background image preloading for page-builder layout elements.
// The visitor runs once per tag during a render; handlers expose a render over HTTP.

pub mod handlers;
pub mod meta;
pub mod render;
pub mod visitor;

