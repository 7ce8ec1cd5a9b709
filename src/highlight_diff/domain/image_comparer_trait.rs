use crate::domain::comparison::{ComparisonOptions, ComparisonResult};
use crate::domain::error::DomainError;
use crate::domain::ignore_region::IgnoreRegion;
use image::DynamicImage;

// 同じサイズ・同じチャンネル構成の画像ペアを比較する
#[cfg_attr(test, mockall::automock)]
pub trait ImageComparer {
    fn compare(
        &self,
        image_a: &DynamicImage,
        image_b: &DynamicImage,
        ignore_regions: &[IgnoreRegion],
        options: &ComparisonOptions,
    ) -> Result<ComparisonResult, DomainError>;
}
