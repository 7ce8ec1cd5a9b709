use crate::domain::region::Region;
use image::{imageops, Rgba, RgbaImage};

pub const DEFAULT_OPACITY: f32 = 0.85;
pub const DEFAULT_STROKE_WIDTH: u32 = 3;
pub const HIGHLIGHT_YELLOW: Rgba<u8> = Rgba([255, 255, 0, 255]);

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonOptions {
    /// How far unchanged areas of the first image are dimmed toward black, in [0, 1].
    pub opacity: f32,
    pub stroke_width: u32,
    pub highlight: Rgba<u8>,
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            opacity: DEFAULT_OPACITY,
            stroke_width: DEFAULT_STROKE_WIDTH,
            highlight: HIGHLIGHT_YELLOW,
        }
    }
}

impl ComparisonOptions {
    pub fn with_opacity(opacity: f32) -> Self {
        Self {
            opacity,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub annotated_a: RgbaImage,
    pub annotated_b: RgbaImage,
    pub blended: RgbaImage,
    pub regions: Vec<Region>,
}

impl ComparisonResult {
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn has_differences(&self) -> bool {
        !self.regions.is_empty()
    }

    /// Both annotated images on one canvas of double width, A on the left.
    pub fn side_by_side(&self) -> RgbaImage {
        let (width, height) = self.annotated_a.dimensions();
        let mut merged = RgbaImage::new(width * 2, height);
        imageops::replace(&mut merged, &self.annotated_a, 0, 0);
        imageops::replace(&mut merged, &self.annotated_b, i64::from(width), 0);
        merged
    }
}
