use image::ColorType;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("Dimension mismatch: {left:?} vs {right:?}")]
    DimensionMismatch {
        left: (u32, u32),
        right: (u32, u32),
    },

    #[error("Channel layout mismatch: {left:?} vs {right:?}")]
    LayoutMismatch { left: ColorType, right: ColorType },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
