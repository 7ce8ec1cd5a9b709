use crate::domain::error::DomainError;
use crate::infrastructure::pixel_mask::Mask;
use image::{ColorType, DynamicImage, GrayImage, Luma, Rgba};
use tracing::debug;

pub const CHANGED: u8 = 255;
pub const UNCHANGED: u8 = 0;

// Rec.709 luma weights, the same ones `image` uses for its grayscale conversion.
const LUMA_R: u64 = 2126;
const LUMA_G: u64 = 7152;
const LUMA_B: u64 = 722;
const LUMA_SCALE: u64 = 10_000;
const LUMA_F32: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Binary field of changed (255) and unchanged (0) pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffField(GrayImage);

impl DiffField {
    pub fn dimensions(&self) -> (u32, u32) {
        self.0.dimensions()
    }

    pub fn is_changed(&self, x: u32, y: u32) -> bool {
        self.0.get_pixel(x, y)[0] == CHANGED
    }

    pub fn changed_count(&self) -> usize {
        self.0.pixels().filter(|p| p[0] == CHANGED).count()
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.0
    }
}

/// Fails fast if the two images disagree on size or channel layout.
pub fn check_compatible(image_a: &DynamicImage, image_b: &DynamicImage) -> Result<(), DomainError> {
    let (left, right) = (dims(image_a), dims(image_b));
    if left != right {
        return Err(DomainError::DimensionMismatch { left, right });
    }
    if image_a.color() != image_b.color() {
        return Err(DomainError::LayoutMismatch {
            left: image_a.color(),
            right: image_b.color(),
        });
    }
    Ok(())
}

fn dims(image: &DynamicImage) -> (u32, u32) {
    (image.width(), image.height())
}

/// Collapses a per-channel absolute difference to one 8-bit intensity. Any
/// non-zero channel, alpha included, yields at least 1.
fn reduce(a: &Rgba<u16>, b: &Rgba<u16>) -> u8 {
    let d: [u16; 4] = std::array::from_fn(|i| a[i].abs_diff(b[i]));
    if d.iter().all(|&c| c == 0) {
        return 0;
    }
    let luma16 = (LUMA_R * u64::from(d[0]) + LUMA_G * u64::from(d[1]) + LUMA_B * u64::from(d[2])) / LUMA_SCALE;
    ((luma16 >> 8) as u8).max(1)
}

/// Float variant: compares raw samples, so values above 1.0 and differences
/// finer than 16 bits still count. NaN against NaN is no change.
fn reduce_f32(a: &Rgba<f32>, b: &Rgba<f32>) -> u8 {
    let differs = (0..4).any(|i| a[i] != b[i] && !(a[i].is_nan() && b[i].is_nan()));
    if !differs {
        return 0;
    }
    let luma: f32 = (0..3)
        .map(|i| LUMA_F32[i] * (a[i] - b[i]).abs())
        .filter(|v| v.is_finite())
        .sum();
    ((luma * 255.0).min(255.0) as u8).max(1)
}

fn is_float(color: ColorType) -> bool {
    matches!(color, ColorType::Rgb32F | ColorType::Rgba32F)
}

pub fn compute(image_a: &DynamicImage, image_b: &DynamicImage, mask: &Mask) -> Result<DiffField, DomainError> {
    check_compatible(image_a, image_b)?;
    let size = dims(image_a);
    if mask.dimensions() != size {
        return Err(DomainError::DimensionMismatch {
            left: size,
            right: mask.dimensions(),
        });
    }

    // 整数は16bitに揃えて差分を取る (8bit入力も精度を失わない)、浮動小数点はそのまま
    let intensities: Vec<u8> = if is_float(image_a.color()) {
        let (a, b) = (image_a.to_rgba32f(), image_b.to_rgba32f());
        a.pixels().zip(b.pixels()).map(|(p, q)| reduce_f32(p, q)).collect()
    } else {
        let (a, b) = (image_a.to_rgba16(), image_b.to_rgba16());
        a.pixels().zip(b.pixels()).map(|(p, q)| reduce(p, q)).collect()
    };
    let mask = mask.as_image();

    let field = GrayImage::from_fn(size.0, size.1, |x, y| {
        let idx = y as usize * size.0 as usize + x as usize;
        let intensity = u16::from(intensities[idx]);
        let masked = intensity * u16::from(mask.get_pixel(x, y)[0]);
        if masked > 0 {
            Luma([CHANGED])
        } else {
            Luma([UNCHANGED])
        }
    });

    let field = DiffField(field);
    debug!(changed = field.changed_count(), "Computed difference field");
    Ok(field)
}
