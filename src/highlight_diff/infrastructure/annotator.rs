use crate::domain::region::{BoundingBox, Region};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;

/// Converts both images to 8-bit RGBA and outlines every region's bounding box
/// on each. 16-bit and float sources are quantized to 8 bits per channel.
pub fn annotate(
    image_a: &DynamicImage,
    image_b: &DynamicImage,
    regions: &[Region],
    stroke_width: u32,
    color: Rgba<u8>,
) -> (RgbaImage, RgbaImage) {
    let mut annotated_a = image_a.to_rgba8();
    let mut annotated_b = image_b.to_rgba8();

    for region in regions {
        let bbox = region.bounding_box();
        draw_outline(&mut annotated_a, bbox, stroke_width, color);
        draw_outline(&mut annotated_b, bbox, stroke_width, color);
    }

    debug!(regions = regions.len(), stroke_width, "Annotated images");
    (annotated_a, annotated_b)
}

/// Draws an unfilled rectangle whose stroke grows inward from `bbox`.
///
/// Each side is a filled band `stroke_width` pixels thick, cut off at the box
/// centre, so a box thinner than twice the stroke comes out solid and a 1x1 box
/// paints a single pixel.
pub fn draw_outline(image: &mut RgbaImage, bbox: BoundingBox, stroke_width: u32, color: Rgba<u8>) {
    if stroke_width == 0 {
        return;
    }
    let (w, h) = (bbox.width(), bbox.height());
    let band_h = stroke_width.min(h);
    let band_w = stroke_width.min(w);
    let (left, top) = (bbox.x_min as i32, bbox.y_min as i32);

    // top, bottom
    draw_filled_rect_mut(image, Rect::at(left, top).of_size(w, band_h), color);
    draw_filled_rect_mut(
        image,
        Rect::at(left, (bbox.y_max + 1 - band_h) as i32).of_size(w, band_h),
        color,
    );
    // left, right
    draw_filled_rect_mut(image, Rect::at(left, top).of_size(band_w, h), color);
    draw_filled_rect_mut(
        image,
        Rect::at((bbox.x_max + 1 - band_w) as i32, top).of_size(band_w, h),
        color,
    );
}
