use crate::infrastructure::difference_field::DiffField;
use image::RgbaImage;
use tracing::debug;

/// Dims the whole of `annotated_a` toward opaque black by `opacity`, then copies
/// `annotated_b` over every changed pixel of `diff`.
///
/// `opacity` is clamped to [0, 1]. Callers guarantee equal dimensions.
pub fn composite(annotated_a: &RgbaImage, annotated_b: &RgbaImage, diff: &DiffField, opacity: f32) -> RgbaImage {
    let weight = shade_weight(opacity);
    let mut blended = annotated_a.clone();

    for pixel in blended.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        pixel.0 = [
            blend(r, 0, weight),
            blend(g, 0, weight),
            blend(b, 0, weight),
            blend(a, u8::MAX, weight),
        ];
    }

    // ステンシル: 変化したピクセルだけ B で置き換える
    for (x, y, pixel) in blended.enumerate_pixels_mut() {
        if diff.is_changed(x, y) {
            *pixel = *annotated_b.get_pixel(x, y);
        }
    }

    debug!(opacity, weight, "Composited blend image");
    blended
}

fn shade_weight(opacity: f32) -> u8 {
    let opacity = if opacity.is_nan() { 0.0 } else { opacity.clamp(0.0, 1.0) };
    (255.0 * opacity).floor() as u8
}

/// `base` moved toward `shade` by `weight`/255, rounded to nearest.
fn blend(base: u8, shade: u8, weight: u8) -> u8 {
    let weight = u32::from(weight);
    let mixed = u32::from(base) * (255 - weight) + u32::from(shade) * weight;
    ((mixed + 127) / 255) as u8
}
