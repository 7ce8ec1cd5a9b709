pub mod annotator;
pub mod compositor;
pub mod difference_field;
pub mod error;
pub mod file_storage;
pub mod image_comparer;
pub mod pixel_mask;
pub mod region_labeler;
