//! Graph diagram rasterization for dox.
//!
//! [`KrokiDotRenderer`] implements [`dox_renderer::DiagramRenderer`] by posting
//! Graphviz sources to a [Kroki](https://kroki.io) server and caching the
//! resulting images next to a content hash.

mod cache;
mod consts;
mod dot;
mod error;
mod kroki;

pub use cache::DiagramKey;
pub use dot::KrokiDotRenderer;
pub use error::DotError;
