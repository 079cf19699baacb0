//! Tall-image slice planning.
//!
//! A source image much taller than the canvas would be illegible as a single
//! frame. For paging-capable styles the image is instead cut into
//! canvas-shaped segments read top to bottom, with a slight overlap between
//! consecutive segments so no content is lost at the seams.

use crate::render::Canvas;

/// A source counts as tall once its height exceeds this multiple of the
/// height implied by the canvas aspect ratio at the source's width.
pub const TALL_FACTOR: f64 = 1.5;

/// Fraction of a full segment's height shared between consecutive segments.
pub const OVERLAP_RATIO: f64 = 0.15;

/// A trailing segment smaller than this fraction of a full segment is
/// dropped, unless it would be the only segment.
pub const MIN_TAIL_RATIO: f64 = 0.3;

/// One vertical region of the source image, in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceRegion {
    /// Top edge of the region.
    pub top: u32,
    /// Region height; the full segment height except possibly for the tail.
    pub height: u32,
}

/// Whether a `width x height` source is tall relative to the canvas.
pub fn is_tall(width: u32, height: u32, canvas: Canvas) -> bool {
    if width == 0 {
        return false;
    }
    height as f64 > (width as f64 / canvas.aspect()) * TALL_FACTOR
}

/// Plan the vertical regions a tall source is cut into.
///
/// Segment height is the source width divided by the canvas aspect ratio, so
/// each segment fills the canvas without horizontal cropping. Consecutive
/// segments overlap by [`OVERLAP_RATIO`] of a segment. Planning stops once
/// the remaining unsliced height would yield a segment under
/// [`MIN_TAIL_RATIO`] of a full one, unless no segment has been produced yet.
pub fn plan_slices(width: u32, height: u32, canvas: Canvas) -> Vec<SliceRegion> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let segment = (width as f64 / canvas.aspect()).floor().max(1.0) as u32;
    let overlap = (segment as f64 * OVERLAP_RATIO).floor() as u32;

    let mut regions = Vec::new();
    let mut top = 0u32;
    while top < height {
        let extract = segment.min(height - top);
        if (extract as f64) < segment as f64 * MIN_TAIL_RATIO && !regions.is_empty() {
            break;
        }
        regions.push(SliceRegion {
            top,
            height: extract,
        });
        top += segment - overlap;
    }
    regions
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::AspectRatio;

    fn landscape() -> Canvas {
        AspectRatio::Landscape.canvas()
    }

    fn portrait() -> Canvas {
        AspectRatio::Portrait.canvas()
    }

    // -- is_tall --------------------------------------------------------------

    #[test]
    fn square_image_is_not_tall_on_landscape() {
        // Implied height at width 1000 on 16:9 is 562; threshold is 843.
        assert!(!is_tall(1000, 800, landscape()));
    }

    #[test]
    fn webtoon_page_is_tall() {
        assert!(is_tall(800, 12000, portrait()));
        assert!(is_tall(800, 12000, landscape()));
    }

    #[test]
    fn image_just_under_threshold_is_not_tall() {
        // Portrait aspect 720/1280 = 0.5625; implied height at width 720 is
        // 1280, threshold 1920.
        assert!(!is_tall(720, 1920, portrait()));
        assert!(is_tall(720, 1921, portrait()));
    }

    // -- plan_slices ----------------------------------------------------------

    #[test]
    fn consecutive_segments_overlap_by_fifteen_percent() {
        // Portrait canvas, width 720 -> segment 1280, overlap 192.
        let regions = plan_slices(720, 4000, portrait());
        assert!(regions.len() > 1);
        assert_eq!(regions[0].top, 0);
        assert_eq!(regions[0].height, 1280);
        assert_eq!(regions[1].top, 1280 - 192);
        // Overlap is identical between every consecutive pair.
        for pair in regions.windows(2) {
            assert_eq!(pair[1].top, pair[0].top + 1280 - 192);
        }
    }

    #[test]
    fn small_tail_is_dropped() {
        // Segment 1280, step 1088. The third segment clamps to the 1224
        // remaining rows; the would-be fourth at top 3264 is only 136 rows,
        // under 30% of a segment (384), and gets cut.
        let regions = plan_slices(720, 3400, portrait());
        assert_eq!(regions.len(), 3);
        assert_eq!(regions[2].height, 1224);
        assert!(regions.iter().all(|r| r.height >= 384));
    }

    #[test]
    fn tail_at_least_thirty_percent_is_kept() {
        // After three full segments top = 3264; 500 remaining rows exceed
        // the 384-row minimum, so a short fourth segment survives.
        let regions = plan_slices(720, 3764, portrait());
        assert_eq!(regions.len(), 4);
        assert_eq!(regions[3].height, 500);
    }

    #[test]
    fn sole_segment_is_never_dropped() {
        // Shorter than 30% of a segment, but it is the only one.
        let regions = plan_slices(720, 300, portrait());
        assert_eq!(
            regions,
            vec![SliceRegion {
                top: 0,
                height: 300
            }]
        );
    }

    #[test]
    fn degenerate_dimensions_produce_no_slices() {
        assert!(plan_slices(0, 1000, portrait()).is_empty());
        assert!(plan_slices(720, 0, portrait()).is_empty());
    }
}
