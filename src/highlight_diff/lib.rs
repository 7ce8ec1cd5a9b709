//! Highlights the regions that differ between two screenshots of the same content.
//!
//! The comparison pipeline masks ignored rectangles, thresholds a per-pixel
//! difference, groups changed pixels into 4-connected regions, outlines each
//! region on both images and blends them into a single overview.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use domain::comparison::{ComparisonOptions, ComparisonResult};
pub use domain::error::DomainError;
pub use domain::ignore_region::IgnoreRegion;
pub use domain::region::{BoundingBox, Region};
pub use infrastructure::image_comparer::compare_images;
