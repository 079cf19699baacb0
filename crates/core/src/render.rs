//! Render configuration: canvas presets, composition styles, and the
//! per-style camera-motion filter.
//!
//! The output canvas is a closed two-preset choice (portrait or landscape);
//! arbitrary aspect ratios are intentionally not representable. Styles are a
//! closed enumeration so every dispatch site match is exhaustive-checked.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Fixed output frame rate for rendered slideshows.
pub const FRAME_RATE: u32 = 30;

/// Default seconds each frame is displayed.
pub const DEFAULT_DURATION_SECS: f64 = 3.0;

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// Output canvas preset selected by the `ratio` configuration field.
///
/// `"9:16"` selects portrait; every other value (including absence) selects
/// the landscape default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    /// 720x1280 vertical output.
    Portrait,
    /// 1280x720 horizontal output.
    #[default]
    Landscape,
}

impl AspectRatio {
    /// The fixed output dimensions for this preset.
    pub fn canvas(self) -> Canvas {
        match self {
            AspectRatio::Portrait => Canvas {
                width: 720,
                height: 1280,
            },
            AspectRatio::Landscape => Canvas {
                width: 1280,
                height: 720,
            },
        }
    }

    fn as_ratio_str(self) -> &'static str {
        match self {
            AspectRatio::Portrait => "9:16",
            AspectRatio::Landscape => "16:9",
        }
    }
}

impl Serialize for AspectRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ratio_str())
    }
}

impl<'de> Deserialize<'de> for AspectRatio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw == "9:16" {
            AspectRatio::Portrait
        } else {
            AspectRatio::Landscape
        })
    }
}

/// Fixed output frame dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Width over height.
    pub fn aspect(self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Composition and camera-motion recipe applied to a job's images.
///
/// Unknown or missing wire values fall back to [`Style::BlurBg`], so a newer
/// collaborator can never fail a job by sending a style this build does not
/// know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Resize to cover the canvas with a centered crop.
    SmartCrop,
    /// Cover-crop composition with a monotonic zoom-in motion.
    ZoomIn,
    /// Fit inside the canvas, padding with solid background.
    SimpleFit,
    /// Slow vertical page-through motion, meant for sliced tall images.
    ScrollDown,
    /// Fixed zoom with a rightward pan.
    PanRight,
    /// Fixed zoom with a leftward pan.
    PanLeft,
    /// Blurred, darkened cover-crop backdrop with an undistorted
    /// contain-fitted copy on top. The default.
    #[serde(other)]
    BlurBg,
}

impl Default for Style {
    fn default() -> Self {
        Style::BlurBg
    }
}

impl Style {
    /// Whether tall sources are paged into multiple canvas-shaped segments
    /// under this style instead of being composited as a single frame.
    pub fn supports_slicing(self) -> bool {
        matches!(self, Style::ScrollDown | Style::SmartCrop | Style::ZoomIn)
    }

    /// Wire name, for logging.
    pub fn as_str(self) -> &'static str {
        match self {
            Style::SmartCrop => "smart_crop",
            Style::ZoomIn => "zoom_in",
            Style::SimpleFit => "simple_fit",
            Style::ScrollDown => "scroll_down",
            Style::PanRight => "pan_right",
            Style::PanLeft => "pan_left",
            Style::BlurBg => "blur_bg",
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Render configuration
// ---------------------------------------------------------------------------

/// Per-job render configuration from the wire `config` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    pub ratio: AspectRatio,
    pub duration_per_img: f64,
    pub style: Style,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ratio: AspectRatio::default(),
            duration_per_img: DEFAULT_DURATION_SECS,
            style: Style::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Camera motion
// ---------------------------------------------------------------------------

/// Build the per-frame `zoompan` motion filter for a style.
///
/// The zoom step is computed from the total frame count
/// (`duration x frame rate`) toward the style's target endpoint, so every
/// frame's motion covers its full display duration regardless of length.
pub fn motion_filter(style: Style, canvas: Canvas, duration_secs: f64) -> String {
    let frames = (duration_secs * FRAME_RATE as f64).round().max(1.0) as u64;
    let size = format!("{}x{}", canvas.width, canvas.height);
    let step = |target: f64| format!("{:.7}", (target - 1.0).abs() / frames as f64);

    match style {
        Style::ZoomIn => format!(
            "zoompan=z='min(zoom+{},1.5)':d={frames}:x='iw/2-(iw/zoom/2)':y='ih/2-(ih/zoom/2)':s={size}",
            step(1.5),
        ),
        Style::PanRight => {
            format!("zoompan=z=1.2:x='x+2':y='ih/2-(ih/zoom/2)':d={frames}:s={size}")
        }
        Style::PanLeft => format!(
            "zoompan=z=1.2:x='if(eq(on,1),iw/2,x-2)':y='ih/2-(ih/zoom/2)':d={frames}:s={size}"
        ),
        Style::ScrollDown => format!(
            "zoompan=z='min(zoom+{},1.1)':d={frames}:x='iw/2-(iw/zoom/2)':y='ih/2-(ih/zoom/2)':s={size}",
            step(1.1),
        ),
        // Subtle breathing zoom for the remaining compositions.
        Style::SmartCrop | Style::SimpleFit | Style::BlurBg => format!(
            "zoompan=z='min(zoom+{},1.05)':d={frames}:x='iw/2-(iw/zoom/2)':y='ih/2-(ih/zoom/2)':s={size}",
            step(1.05),
        ),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- AspectRatio ----------------------------------------------------------

    #[test]
    fn portrait_ratio_selects_vertical_canvas() {
        let ratio: AspectRatio = serde_json::from_str("\"9:16\"").unwrap();
        assert_eq!(ratio, AspectRatio::Portrait);
        assert_eq!(
            ratio.canvas(),
            Canvas {
                width: 720,
                height: 1280
            }
        );
    }

    #[test]
    fn any_other_ratio_selects_landscape() {
        for raw in ["\"16:9\"", "\"4:3\"", "\"\"", "\"widescreen\""] {
            let ratio: AspectRatio = serde_json::from_str(raw).unwrap();
            assert_eq!(ratio, AspectRatio::Landscape);
            assert_eq!(
                ratio.canvas(),
                Canvas {
                    width: 1280,
                    height: 720
                }
            );
        }
    }

    // -- Style ----------------------------------------------------------------

    #[test]
    fn known_styles_deserialize() {
        let style: Style = serde_json::from_str("\"scroll_down\"").unwrap();
        assert_eq!(style, Style::ScrollDown);
    }

    #[test]
    fn unknown_style_falls_back_to_blur_bg() {
        let style: Style = serde_json::from_str("\"glitter_wipe\"").unwrap();
        assert_eq!(style, Style::BlurBg);
    }

    #[test]
    fn missing_config_fields_use_defaults() {
        let config: RenderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.style, Style::BlurBg);
        assert_eq!(config.ratio, AspectRatio::Landscape);
        assert_eq!(config.duration_per_img, DEFAULT_DURATION_SECS);
    }

    #[test]
    fn slicing_eligibility_is_limited_to_paging_styles() {
        assert!(Style::ScrollDown.supports_slicing());
        assert!(Style::SmartCrop.supports_slicing());
        assert!(Style::ZoomIn.supports_slicing());
        assert!(!Style::BlurBg.supports_slicing());
        assert!(!Style::SimpleFit.supports_slicing());
        assert!(!Style::PanRight.supports_slicing());
        assert!(!Style::PanLeft.supports_slicing());
    }

    // -- Motion filters -------------------------------------------------------

    #[test]
    fn zoom_in_targets_one_point_five() {
        let canvas = AspectRatio::Landscape.canvas();
        let filter = motion_filter(Style::ZoomIn, canvas, 3.0);
        // 0.5 zoom delta over 90 frames.
        assert!(filter.contains("min(zoom+0.0055556,1.5)"), "{filter}");
        assert!(filter.contains(":d=90:"), "{filter}");
        assert!(filter.ends_with(":s=1280x720"), "{filter}");
    }

    #[test]
    fn pan_left_holds_after_first_frame() {
        let canvas = AspectRatio::Portrait.canvas();
        let filter = motion_filter(Style::PanLeft, canvas, 3.0);
        assert!(filter.contains("z=1.2"), "{filter}");
        assert!(filter.contains("if(eq(on,1),iw/2,x-2)"), "{filter}");
        assert!(filter.ends_with(":s=720x1280"), "{filter}");
    }

    #[test]
    fn default_style_breathes_to_one_point_oh_five() {
        let canvas = AspectRatio::Landscape.canvas();
        let filter = motion_filter(Style::BlurBg, canvas, 3.0);
        assert!(filter.contains("1.05"), "{filter}");
    }

    #[test]
    fn frame_count_scales_with_duration() {
        let canvas = AspectRatio::Landscape.canvas();
        let filter = motion_filter(Style::ZoomIn, canvas, 5.0);
        assert!(filter.contains(":d=150:"), "{filter}");
    }
}
