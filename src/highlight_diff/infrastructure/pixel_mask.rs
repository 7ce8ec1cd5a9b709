use crate::domain::ignore_region::IgnoreRegion;
use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::{debug, warn};

pub const ACTIVE: u8 = 255;
pub const SUPPRESSED: u8 = 0;

/// Single-channel mask: 255 where differences count, 0 inside ignore regions.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask(GrayImage);

impl Mask {
    pub fn dimensions(&self) -> (u32, u32) {
        self.0.dimensions()
    }

    pub fn is_active(&self, x: u32, y: u32) -> bool {
        self.0.get_pixel(x, y)[0] == ACTIVE
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.0
    }
}

/// Builds a fully active mask of `width` x `height`, then paints every ignore
/// region suppressed in order.
pub fn build(width: u32, height: u32, ignore_regions: &[IgnoreRegion]) -> Mask {
    let mut mask = GrayImage::from_pixel(width, height, Luma([ACTIVE]));

    for region in ignore_regions {
        if region.is_inverted() {
            warn!(?region, "Ignore region has inverted bounds, skipping");
            continue;
        }
        // 画像外の部分は切り捨てる
        let Some((x1, y1, x2, y2)) = region.clip(width, height) else {
            continue;
        };
        let rect = Rect::at(x1 as i32, y1 as i32).of_size(x2 - x1 + 1, y2 - y1 + 1);
        draw_filled_rect_mut(&mut mask, rect, Luma([SUPPRESSED]));
    }

    debug!(width, height, regions = ignore_regions.len(), "Built ignore mask");
    Mask(mask)
}
