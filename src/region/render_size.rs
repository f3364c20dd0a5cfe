//! Rendering size derived from a region's aspect ratio

use log::debug;

use crate::coordinate::Extent;
use crate::errors::{RegionError, RegionResult};

/// Default rendering width in pixels
pub const DEFAULT_WIDTH: u32 = 600;
/// Default rendering height in pixels
pub const DEFAULT_HEIGHT: u32 = 400;

/// Concrete rendering size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSize {
    pub width: u32,
    pub height: u32,
}

impl RenderSize {
    pub fn new(width: u32, height: u32) -> Self {
        RenderSize { width, height }
    }
}

/// Computes rendering sizes under partial width/height constraints
#[derive(Debug, Clone, Copy)]
pub struct RenderSizeCalculator {
    default_width: u32,
    default_height: u32,
}

impl Default for RenderSizeCalculator {
    fn default() -> Self {
        RenderSizeCalculator::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl RenderSizeCalculator {
    /// Create a calculator with the given fallback dimensions
    pub fn new(default_width: u32, default_height: u32) -> Self {
        RenderSizeCalculator { default_width, default_height }
    }

    /// Compute the rendering size for a region
    ///
    /// A dimension given as `None` or `Some(0)` is treated as absent.
    /// When both are given they are returned unchanged, otherwise the
    /// missing one follows the region's aspect ratio. With neither given
    /// the longer region side gets its default and the other is derived.
    ///
    /// # Arguments
    /// * `extent` - Region whose aspect ratio drives the result
    /// * `width` - Requested width in pixels
    /// * `height` - Requested height in pixels
    ///
    /// # Returns
    /// The rendering size, or `DegenerateRegion` when the aspect ratio
    /// is needed but the region has zero width or height
    pub fn compute_size(&self, extent: &Extent, width: Option<u32>, height: Option<u32>) -> RegionResult<RenderSize> {
        let width = width.filter(|w| *w > 0);
        let height = height.filter(|h| *h > 0);

        if let (Some(w), Some(h)) = (width, height) {
            return Ok(RenderSize::new(w, h));
        }

        let region_width = extent.width();
        let region_height = extent.height();
        if region_width == 0.0 || region_height == 0.0 {
            return Err(RegionError::DegenerateRegion { width: region_width, height: region_height });
        }

        let scaled = |pixels: u32, ratio: f64| -> RegionResult<u32> {
            scale(pixels, ratio).ok_or(RegionError::DegenerateRegion { width: region_width, height: region_height })
        };

        let size = match (width, height) {
            (Some(w), _) => RenderSize::new(w, scaled(w, region_height / region_width)?),
            (_, Some(h)) => RenderSize::new(scaled(h, region_width / region_height)?, h),
            _ if region_height > region_width => RenderSize::new(
                scaled(self.default_height, region_width / region_height)?,
                self.default_height,
            ),
            _ => RenderSize::new(
                self.default_width,
                scaled(self.default_width, region_height / region_width)?,
            ),
        };

        debug!("Rendering size for region {}x{}: {}x{}",
               region_width, region_height, size.width, size.height);
        Ok(size)
    }
}

/// Scale a pixel dimension by a ratio, rounding half to even
///
/// `None` when the result does not fit a pixel count.
fn scale(pixels: u32, ratio: f64) -> Option<u32> {
    let scaled = (pixels as f64 * ratio).round_ties_even();
    if scaled.is_finite() && scaled <= u32::MAX as f64 {
        Some(scaled as u32)
    } else {
        None
    }
}

/// Compute a rendering size with the default 600x400 fallback
pub fn compute_size(extent: &Extent, width: Option<u32>, height: Option<u32>) -> RegionResult<RenderSize> {
    RenderSizeCalculator::default().compute_size(extent, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extent(n: f64, s: f64, e: f64, w: f64) -> Extent {
        Extent::new(n, s, e, w).unwrap()
    }

    #[test]
    fn test_both_given_unchanged() {
        let size = compute_size(&extent(10.0, 0.0, 20.0, 0.0), Some(123), Some(456)).unwrap();
        assert_eq!(size, RenderSize::new(123, 456));
        // No aspect arithmetic is needed, so a flat region is fine here
        let size = compute_size(&extent(5.0, 5.0, 20.0, 0.0), Some(10), Some(10)).unwrap();
        assert_eq!(size, RenderSize::new(10, 10));
    }

    #[test]
    fn test_width_only() {
        let size = compute_size(&extent(10.0, 0.0, 20.0, 0.0), Some(100), None).unwrap();
        assert_eq!(size, RenderSize::new(100, 50));
    }

    #[test]
    fn test_height_only() {
        let size = compute_size(&extent(10.0, 0.0, 20.0, 0.0), None, Some(50)).unwrap();
        assert_eq!(size, RenderSize::new(100, 50));
    }

    #[test]
    fn test_defaults_follow_longer_side() {
        let tall = compute_size(&extent(30.0, 0.0, 10.0, 0.0), None, None).unwrap();
        assert_eq!(tall, RenderSize::new(133, 400));

        let wide = compute_size(&extent(10.0, 0.0, 30.0, 0.0), None, None).unwrap();
        assert_eq!(wide, RenderSize::new(600, 200));

        let square = compute_size(&extent(10.0, 0.0, 10.0, 0.0), None, None).unwrap();
        assert_eq!(square, RenderSize::new(600, 600));
    }

    #[test]
    fn test_custom_defaults() {
        let calc = RenderSizeCalculator::new(800, 800);
        let size = calc.compute_size(&extent(10.0, 0.0, 20.0, 0.0), None, None).unwrap();
        assert_eq!(size, RenderSize::new(800, 400));
    }

    #[test]
    fn test_zero_counts_as_absent() {
        let size = compute_size(&extent(10.0, 0.0, 20.0, 0.0), Some(100), Some(0)).unwrap();
        assert_eq!(size, RenderSize::new(100, 50));
    }

    #[test]
    fn test_rounds_half_to_even() {
        // 5 * 1/2 = 2.5 -> 2, 7 * 1/2 = 3.5 -> 4
        assert_eq!(compute_size(&extent(1.0, 0.0, 2.0, 0.0), Some(5), None).unwrap().height, 2);
        assert_eq!(compute_size(&extent(1.0, 0.0, 2.0, 0.0), Some(7), None).unwrap().height, 4);
    }

    #[test]
    fn test_degenerate_region() {
        let flat = extent(5.0, 5.0, 20.0, 0.0);
        assert!(matches!(compute_size(&flat, None, Some(100)), Err(RegionError::DegenerateRegion { .. })));
        assert!(matches!(compute_size(&flat, Some(100), None), Err(RegionError::DegenerateRegion { .. })));
        let thin = extent(5.0, 0.0, 3.0, 3.0);
        assert!(matches!(compute_size(&thin, None, None), Err(RegionError::DegenerateRegion { .. })));
    }

    #[test]
    fn test_extreme_aspect_ratio_is_degenerate() {
        let sliver = extent(1.0, 0.0, 1e-300, 0.0);
        assert!(matches!(compute_size(&sliver, Some(100), None), Err(RegionError::DegenerateRegion { .. })));
        let band = extent(1e-300, 0.0, 1.0, 0.0);
        assert!(matches!(compute_size(&band, None, Some(100)), Err(RegionError::DegenerateRegion { .. })));
    }
}
