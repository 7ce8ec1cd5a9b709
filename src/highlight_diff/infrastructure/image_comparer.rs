use crate::domain::comparison::{ComparisonOptions, ComparisonResult};
use crate::domain::error::DomainError;
use crate::domain::ignore_region::IgnoreRegion;
use crate::domain::image_comparer_trait::ImageComparer;
use crate::infrastructure::{annotator, compositor, difference_field, pixel_mask, region_labeler};
use image::DynamicImage;
use tracing::debug;

/// Runs the full pipeline: mask, difference field, labeling, annotation, blend.
pub fn compare_images(
    image_a: &DynamicImage,
    image_b: &DynamicImage,
    ignore_regions: &[IgnoreRegion],
    options: &ComparisonOptions,
) -> Result<ComparisonResult, DomainError> {
    let mask = pixel_mask::build(image_a.width(), image_a.height(), ignore_regions);
    let diff = difference_field::compute(image_a, image_b, &mask)?;
    let regions = region_labeler::label(&diff);
    let (annotated_a, annotated_b) =
        annotator::annotate(image_a, image_b, &regions, options.stroke_width, options.highlight);
    let blended = compositor::composite(&annotated_a, &annotated_b, &diff, options.opacity);

    debug!(regions = regions.len(), "Comparison finished");
    Ok(ComparisonResult {
        annotated_a,
        annotated_b,
        blended,
        regions,
    })
}

pub struct DefaultImageComparer;

impl DefaultImageComparer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DefaultImageComparer {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageComparer for DefaultImageComparer {
    fn compare(
        &self,
        image_a: &DynamicImage,
        image_b: &DynamicImage,
        ignore_regions: &[IgnoreRegion],
        options: &ComparisonOptions,
    ) -> Result<ComparisonResult, DomainError> {
        compare_images(image_a, image_b, ignore_regions, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::comparison::HIGHLIGHT_YELLOW;
    use crate::domain::region::{BoundingBox, Region};
    use image::{Rgb, RgbImage, Rgba};

    fn canvas(color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(10, 10, Rgb(color))
    }

    fn with_changes(base: &RgbImage, points: &[(u32, u32)]) -> RgbImage {
        let mut changed = base.clone();
        for &(x, y) in points {
            changed.put_pixel(x, y, Rgb([250, 10, 10]));
        }
        changed
    }

    fn run(a: RgbImage, b: RgbImage, ignore: &[IgnoreRegion]) -> ComparisonResult {
        DefaultImageComparer::new()
            .compare(
                &DynamicImage::ImageRgb8(a),
                &DynamicImage::ImageRgb8(b),
                ignore,
                &ComparisonOptions::default(),
            )
            .unwrap()
    }

    #[test]
    fn test_no_differences() {
        let a = canvas([90, 90, 90]);
        let result = run(a.clone(), a, &[]);
        assert_eq!(result.region_count(), 0);
        assert!(!result.has_differences());
        // dimmed everywhere, nothing outlined
        assert!(result.blended.pixels().all(|p| *p == Rgba([14, 14, 14, 255])));
        assert!(result.annotated_a.pixels().all(|p| *p == Rgba([90, 90, 90, 255])));
    }

    #[test]
    fn test_single_changed_pixel() {
        let a = canvas([0, 0, 0]);
        let b = with_changes(&a, &[(5, 5)]);
        let result = run(a, b, &[]);
        assert_eq!(result.region_count(), 1);
        assert_eq!(result.regions[0].pixels(), &[(5, 5)]);
        assert_eq!(result.regions[0].bounding_box(), BoundingBox::new(5, 5, 5, 5));
        // the outline covers the pixel on both sides, and the blend shows B there
        assert_eq!(*result.annotated_a.get_pixel(5, 5), HIGHLIGHT_YELLOW);
        assert_eq!(*result.annotated_b.get_pixel(5, 5), HIGHLIGHT_YELLOW);
        assert_eq!(*result.blended.get_pixel(5, 5), HIGHLIGHT_YELLOW);
        assert_eq!(*result.blended.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_two_isolated_changes() {
        let a = canvas([255, 255, 255]);
        let b = with_changes(&a, &[(1, 1), (8, 8)]);
        assert_eq!(run(a, b, &[]).region_count(), 2);
    }

    #[test]
    fn test_fully_masked_change() {
        let a = canvas([0, 0, 0]);
        let b = with_changes(&a, &[(5, 5)]);
        let result = run(a, b, &[IgnoreRegion::new(4, 4, 6, 6)]);
        assert_eq!(result.region_count(), 0);
    }

    #[test]
    fn test_l_shaped_connectivity() {
        let a = canvas([0, 0, 0]);
        let b = with_changes(&a, &[(0, 0), (0, 1), (1, 1)]);
        let result = run(a, b, &[]);
        assert_eq!(result.region_count(), 1);
        assert_eq!(result.regions[0].bounding_box(), BoundingBox::new(0, 0, 1, 1));
    }

    fn changed_total(result: &ComparisonResult) -> usize {
        result.regions.iter().map(Region::len).sum()
    }

    #[test]
    fn test_adding_ignore_regions_never_adds_changed_pixels() {
        let a = canvas([0, 0, 0]);
        let b = with_changes(&a, &[(1, 5), (2, 5), (3, 5), (4, 5), (5, 5), (8, 1), (8, 8)]);
        let ignore_sets: [&[IgnoreRegion]; 4] = [
            &[],
            &[IgnoreRegion::new(8, 8, 9, 9)],
            &[IgnoreRegion::new(8, 8, 9, 9), IgnoreRegion::new(7, 0, 9, 2)],
            &[IgnoreRegion::new(8, 8, 9, 9), IgnoreRegion::new(7, 0, 9, 2), IgnoreRegion::new(0, 4, 6, 6)],
        ];
        let results: Vec<_> = ignore_sets
            .iter()
            .map(|ignore| run(a.clone(), b.clone(), ignore))
            .collect();

        let totals: Vec<_> = results.iter().map(changed_total).collect();
        assert_eq!(totals, vec![7, 6, 5, 0]);
        // each added region covers whole regions, so the count only drops
        let counts: Vec<_> = results.iter().map(ComparisonResult::region_count).collect();
        assert_eq!(counts, vec![3, 2, 1, 0]);
    }

    // Hiding the middle of a bar leaves two separate pieces.
    #[test]
    fn test_ignore_region_can_split_a_region() {
        let a = canvas([0, 0, 0]);
        let b = with_changes(&a, &[(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);
        assert_eq!(run(a.clone(), b.clone(), &[]).region_count(), 1);

        let split = run(a, b, &[IgnoreRegion::new(3, 0, 3, 9)]);
        assert_eq!(split.region_count(), 2);
        assert_eq!(changed_total(&split), 4);
    }

    #[test]
    fn test_dimension_mismatch_is_reported() {
        let a = DynamicImage::ImageRgb8(RgbImage::new(10, 10));
        let b = DynamicImage::ImageRgb8(RgbImage::new(12, 10));
        let result = DefaultImageComparer::new().compare(&a, &b, &[], &ComparisonOptions::default());
        match result {
            Err(DomainError::DimensionMismatch { left, right }) => {
                assert_eq!(left, (10, 10));
                assert_eq!(right, (12, 10));
            }
            other => panic!("Expected DimensionMismatch, got {:?}", other.map(|r| r.region_count())),
        }
    }

    #[test]
    fn test_layout_mismatch_is_reported() {
        let a = DynamicImage::ImageRgb8(RgbImage::new(10, 10));
        let b = DynamicImage::ImageRgba8(image::RgbaImage::new(10, 10));
        match compare_images(&a, &b, &[IgnoreRegion::new(0, 0, 3, 3)], &ComparisonOptions::default()) {
            Err(DomainError::LayoutMismatch { left, right }) => {
                assert_eq!(left, image::ColorType::Rgb8);
                assert_eq!(right, image::ColorType::Rgba8);
            }
            other => panic!("Expected LayoutMismatch, got {:?}", other.map(|r| r.region_count())),
        }
    }
}
