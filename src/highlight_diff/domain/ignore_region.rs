use crate::domain::error::DomainError;
use serde::Deserialize;
use std::str::FromStr;

/// Rectangle excluded from difference detection. Bounds are inclusive and may
/// extend past the image; whatever falls outside is clipped away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "(i32, i32, i32, i32)")]
pub struct IgnoreRegion {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl IgnoreRegion {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn is_inverted(&self) -> bool {
        self.x1 > self.x2 || self.y1 > self.y2
    }

    /// Returns the inclusive `(x_min, y_min, x_max, y_max)` part of the region
    /// lying inside a `width` x `height` canvas, or `None` if nothing is left.
    pub fn clip(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        if self.is_inverted() || width == 0 || height == 0 {
            return None;
        }
        let max_x = i64::from(width) - 1;
        let max_y = i64::from(height) - 1;
        let x1 = i64::from(self.x1).max(0);
        let y1 = i64::from(self.y1).max(0);
        let x2 = i64::from(self.x2).min(max_x);
        let y2 = i64::from(self.y2).min(max_y);
        if x1 > x2 || y1 > y2 {
            return None;
        }
        Some((x1 as u32, y1 as u32, x2 as u32, y2 as u32))
    }
}

impl From<(i32, i32, i32, i32)> for IgnoreRegion {
    fn from((x1, y1, x2, y2): (i32, i32, i32, i32)) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

// "x1,y1,x2,y2"
impl FromStr for IgnoreRegion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::InvalidInput(format!("ignore region '{}': {}", s, e)))?;

        match parts.as_slice() {
            [x1, y1, x2, y2] => Ok(Self::new(*x1, *y1, *x2, *y2)),
            _ => Err(DomainError::InvalidInput(format!(
                "ignore region '{}' must have exactly four comma-separated values",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_from_cli_string() {
        assert_eq!("305,98,306,99".parse::<IgnoreRegion>(), Ok(IgnoreRegion::new(305, 98, 306, 99)));
        assert_eq!(" -1, 2 ,3,4".parse::<IgnoreRegion>(), Ok(IgnoreRegion::new(-1, 2, 3, 4)));
    }

    #[test]
    fn test_parse_rejects_malformed_strings() {
        for bad in ["", "1,2,3", "1,2,3,4,5", "a,b,c,d"] {
            match bad.parse::<IgnoreRegion>() {
                Err(DomainError::InvalidInput(_)) => {}
                other => panic!("Expected InvalidInput for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_deserialize_from_json_tuple() {
        let regions: Vec<IgnoreRegion> = serde_json::from_str("[[305, 100, 309, 114], [313, 98, 313, 98]]").unwrap();
        assert_eq!(regions, vec![IgnoreRegion::new(305, 100, 309, 114), IgnoreRegion::new(313, 98, 313, 98)]);
    }

    #[test]
    fn test_clip_to_canvas() {
        assert_eq!(IgnoreRegion::new(4, 4, 6, 6).clip(10, 10), Some((4, 4, 6, 6)));
        assert_eq!(IgnoreRegion::new(-5, -5, 20, 3).clip(10, 10), Some((0, 0, 9, 3)));
        assert_eq!(IgnoreRegion::new(10, 0, 12, 5).clip(10, 10), None);
        assert_eq!(IgnoreRegion::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX).clip(3, 2), Some((0, 0, 2, 1)));
    }

    // Inverted bounds suppress nothing instead of failing.
    #[test]
    fn test_inverted_region_clips_to_nothing() {
        let region = IgnoreRegion::new(6, 4, 4, 6);
        assert!(region.is_inverted());
        assert_eq!(region.clip(10, 10), None);
    }

    #[test]
    fn test_empty_canvas_clips_to_nothing() {
        assert_eq!(IgnoreRegion::new(0, 0, 1, 1).clip(0, 5), None);
    }
}
