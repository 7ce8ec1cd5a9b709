pub mod comparison;
pub mod error;
pub mod ignore_region;
pub mod image_comparer_trait;
pub mod region;
