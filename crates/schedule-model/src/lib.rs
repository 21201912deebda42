//! Reframe Schedule Model
//!
//! Defines the data contracts of the reframe pipeline:
//! - **Geometry:** Tracked rectangles (working space) and their centers (source space)
//! - **Scenes:** Half-open frame ranges and the centers tracked inside them
//! - **Steps:** Per-frame horizontal reframe positions
//! - **Directives:** Crop/pan instructions for the downstream compositor
//!
//! Rectangles are stored in the tracker's resized working space and scaled
//! back to source pixels by their `ratio` whenever a center is derived.

pub mod directive;
pub mod geometry;
pub mod scene;
pub mod step;
pub mod tracking_log;

pub use directive::*;
pub use geometry::*;
pub use scene::*;
pub use step::*;
pub use tracking_log::*;
