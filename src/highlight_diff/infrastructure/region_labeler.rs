use crate::domain::region::Region;
use crate::infrastructure::difference_field::DiffField;
use tracing::debug;

/// Splits the changed pixels of `field` into maximal 4-connected regions.
///
/// Scans row-major and grows each unvisited changed pixel with an explicit
/// stack, so a large contiguous area never deepens the call stack. Regions come
/// out in the order their seeds are met; callers should not rely on it.
pub fn label(field: &DiffField) -> Vec<Region> {
    let (width, height) = field.dimensions();
    let mut visited = vec![false; width as usize * height as usize];
    let mut regions = Vec::new();
    let mut stack: Vec<(u32, u32)> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = y as usize * width as usize + x as usize;
            if visited[idx] || !field.is_changed(x, y) {
                continue;
            }

            let mut pixels = Vec::new();
            stack.push((x, y));

            while let Some((px, py)) = stack.pop() {
                let pidx = py as usize * width as usize + px as usize;
                if visited[pidx] || !field.is_changed(px, py) {
                    continue;
                }
                visited[pidx] = true;
                pixels.push((px, py));

                // 4近傍のみ
                if px > 0 {
                    stack.push((px - 1, py));
                }
                if px + 1 < width {
                    stack.push((px + 1, py));
                }
                if py > 0 {
                    stack.push((px, py - 1));
                }
                if py + 1 < height {
                    stack.push((px, py + 1));
                }
            }

            if let Some(region) = Region::from_pixels(pixels) {
                regions.push(region);
            }
        }
    }

    debug!(regions = regions.len(), "Labeled connected regions");
    regions
}
