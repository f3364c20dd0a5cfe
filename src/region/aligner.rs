//! Target grid derivation from a source grid and a reprojected extent

use log::debug;

use crate::coordinate::{Extent, Grid};

/// Builds target grids that keep the source grid's shape
///
/// Keeping the row and column counts while adopting the reprojected extent
/// keeps the nominal resolution close to the source. Exact resampling is
/// left to a full raster reprojection tool.
pub struct GridAligner;

impl GridAligner {
    /// Grid with the source's rows and cols over the reprojected extent
    pub fn align(source: &Grid, reprojected: Extent) -> Grid {
        debug!("Aligning {}x{} grid to extent {}", source.rows(), source.cols(), reprojected);
        source.with_extent(reprojected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_preserves_shape_and_adopts_extent() {
        let source = Grid::new(Extent::new(10.0, 0.0, 20.0, 0.0).unwrap(), 37, 81).unwrap();
        let reprojected = Extent::new(1113194.9, 0.0, 2226389.8, 0.0).unwrap();

        let aligned = GridAligner::align(&source, reprojected);
        assert_eq!(aligned.rows(), 37);
        assert_eq!(aligned.cols(), 81);
        assert_eq!(aligned.extent(), reprojected);
    }
}
