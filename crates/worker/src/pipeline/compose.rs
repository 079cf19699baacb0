//! Frame composition: one source image in, one or more canvas-sized frames
//! out.
//!
//! All functions here are synchronous CPU work; the pipeline driver runs
//! them on the blocking pool. Frame filenames encode (source index, slice
//! index) so the manifest order is deterministic regardless of which asset
//! finishes first.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{imageops, DynamicImage, Rgb, RgbImage};

use slidecast_core::render::{Canvas, Style};
use slidecast_core::slice::{is_tall, plan_slices};

/// Gaussian sigma for the blurred backdrop.
const BACKDROP_BLUR_SIGMA: f32 = 40.0;

/// Brightness multiplier for the blurred backdrop.
const BACKDROP_BRIGHTNESS: f32 = 0.7;

/// Errors from composing a single source image.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("image decode/encode failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Compose one downloaded source into output frames.
///
/// Tall sources under a paging style are sliced into multiple segments,
/// each contain-fitted onto a black canvas. Everything else produces one
/// frame according to the style. Returns the written frame paths in slice
/// order.
pub fn compose_source(
    input: &Path,
    out_dir: &Path,
    index: usize,
    style: Style,
    canvas: Canvas,
) -> Result<Vec<PathBuf>, ComposeError> {
    let img = image::open(input)?;
    let (width, height) = (img.width(), img.height());
    let tall = is_tall(width, height, canvas);

    if tall && style.supports_slicing() {
        let mut frames = Vec::new();
        for (slice_index, region) in plan_slices(width, height, canvas).iter().enumerate() {
            let segment = img.crop_imm(0, region.top, width, region.height);
            let frame = contain_on_black(&segment, canvas);
            frames.push(save_frame(frame, out_dir, index, slice_index)?);
        }
        return Ok(frames);
    }

    let frame = match style {
        // Cover the canvas with a centered crop. Tall sources never take
        // this branch under a slicing-capable style, and under the others
        // they fall through to the blurred backdrop below.
        Style::SmartCrop | Style::ZoomIn => img
            .resize_to_fill(canvas.width, canvas.height, FilterType::Lanczos3)
            .to_rgb8(),
        Style::SimpleFit => contain_on_black(&img, canvas),
        Style::BlurBg | Style::ScrollDown | Style::PanRight | Style::PanLeft => {
            blurred_backdrop(&img, canvas)
        }
    };

    Ok(vec![save_frame(frame, out_dir, index, 0)?])
}

/// Fit the image inside the canvas, padding with black.
fn contain_on_black(img: &DynamicImage, canvas: Canvas) -> RgbImage {
    let fitted = img
        .resize(canvas.width, canvas.height, FilterType::Lanczos3)
        .to_rgb8();
    let mut frame = RgbImage::from_pixel(canvas.width, canvas.height, Rgb([0, 0, 0]));
    let x = (canvas.width - fitted.width()) / 2;
    let y = (canvas.height - fitted.height()) / 2;
    imageops::overlay(&mut frame, &fitted, x as i64, y as i64);
    frame
}

/// Cover-cropped, blurred, darkened backdrop with an undistorted
/// contain-fitted copy composited on top.
fn blurred_backdrop(img: &DynamicImage, canvas: Canvas) -> RgbImage {
    let cover = img
        .resize_to_fill(canvas.width, canvas.height, FilterType::Lanczos3)
        .to_rgb8();
    let mut backdrop = imageops::fast_blur(&cover, BACKDROP_BLUR_SIGMA);
    darken(&mut backdrop, BACKDROP_BRIGHTNESS);

    let fitted = img
        .resize(canvas.width, canvas.height, FilterType::Lanczos3)
        .to_rgb8();
    let x = (canvas.width - fitted.width()) / 2;
    let y = (canvas.height - fitted.height()) / 2;
    imageops::overlay(&mut backdrop, &fitted, x as i64, y as i64);
    backdrop
}

/// Scale every channel by `factor`.
fn darken(img: &mut RgbImage, factor: f32) {
    for pixel in img.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = (*channel as f32 * factor) as u8;
        }
    }
}

/// Write a frame as `frame_{index:03}_{slice:02}.jpg`.
fn save_frame(
    frame: RgbImage,
    out_dir: &Path,
    index: usize,
    slice_index: usize,
) -> Result<PathBuf, ComposeError> {
    let path = out_dir.join(format!("frame_{index:03}_{slice_index:02}.jpg"));
    frame.save(&path)?;
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use slidecast_core::render::AspectRatio;

    /// Write a solid-color source image and return its path.
    fn source_image(dir: &Path, width: u32, height: u32) -> PathBuf {
        let path = dir.join(format!("src_{width}x{height}.png"));
        RgbImage::from_pixel(width, height, Rgb([200, 60, 60]))
            .save(&path)
            .unwrap();
        path
    }

    fn frame_dims(path: &Path) -> (u32, u32) {
        let img = image::open(path).unwrap();
        (img.width(), img.height())
    }

    #[test]
    fn smart_crop_covers_the_canvas_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let canvas = AspectRatio::Landscape.canvas();
        let input = source_image(dir.path(), 1000, 800);

        let frames =
            compose_source(&input, dir.path(), 0, Style::SmartCrop, canvas).unwrap();

        assert_eq!(frames.len(), 1);
        assert_eq!(frame_dims(&frames[0]), (1280, 720));
    }

    #[test]
    fn simple_fit_letterboxes_onto_the_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let canvas = AspectRatio::Landscape.canvas();
        let input = source_image(dir.path(), 100, 100);

        let frames =
            compose_source(&input, dir.path(), 0, Style::SimpleFit, canvas).unwrap();

        assert_eq!(frames.len(), 1);
        assert_eq!(frame_dims(&frames[0]), (1280, 720));
        // The padded corners stay black.
        let img = image::open(&frames[0]).unwrap().to_rgb8();
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn blur_bg_fills_the_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let canvas = AspectRatio::Portrait.canvas();
        let input = source_image(dir.path(), 400, 300);

        let frames = compose_source(&input, dir.path(), 2, Style::BlurBg, canvas).unwrap();

        assert_eq!(frames.len(), 1);
        assert_eq!(frame_dims(&frames[0]), (720, 1280));
        // Backdrop corners are darkened image content, not black padding.
        let img = image::open(&frames[0]).unwrap().to_rgb8();
        assert_ne!(img.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn tall_source_with_paging_style_is_sliced() {
        let dir = tempfile::tempdir().unwrap();
        let canvas = AspectRatio::Portrait.canvas();
        // Width 720 -> segment 1280; clearly past the 1.5x threshold.
        let input = source_image(dir.path(), 720, 4000);

        let frames =
            compose_source(&input, dir.path(), 0, Style::ScrollDown, canvas).unwrap();

        assert_eq!(frames.len(), plan_slices(720, 4000, canvas).len());
        assert!(frames.len() > 1);
        for frame in &frames {
            assert_eq!(frame_dims(frame), (720, 1280));
        }
    }

    #[test]
    fn tall_source_without_paging_style_is_one_frame() {
        let dir = tempfile::tempdir().unwrap();
        let canvas = AspectRatio::Portrait.canvas();
        let input = source_image(dir.path(), 720, 4000);

        let frames = compose_source(&input, dir.path(), 0, Style::BlurBg, canvas).unwrap();

        assert_eq!(frames.len(), 1);
        assert_eq!(frame_dims(&frames[0]), (720, 1280));
    }

    #[test]
    fn frame_names_order_by_source_then_slice() {
        let dir = tempfile::tempdir().unwrap();
        let canvas = AspectRatio::Portrait.canvas();
        let input = source_image(dir.path(), 720, 4000);

        let frames =
            compose_source(&input, dir.path(), 7, Style::ZoomIn, canvas).unwrap();

        let names: Vec<String> = frames
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names[0], "frame_007_00.jpg");
        assert_eq!(names[1], "frame_007_01.jpg");
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
