//! Viewer configuration: input-source selection, camera resolution, pacing.

use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default bounded wait for one input event per cycle, which also paces the
/// loop (the viewer's frame cadence is keyed off the source, not a timer).
pub const DEFAULT_KEY_WAIT: Duration = Duration::from_millis(10);

/// Which body source the viewer reads from.
///
/// The three modes are mutually exclusive on the command line; `Live` is the
/// default when neither replay nor stream is requested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSelection {
    /// Live tracking device (synthetic backend in builds without a device SDK).
    Live,
    /// Replay of a recorded body-frame log (JSON lines).
    Replay(PathBuf),
    /// Network stream of body frames from `host:port`.
    Stream(String),
}

impl InputSelection {
    /// Resolve the CLI flags into a selection, rejecting contradictory input.
    pub fn from_flags(replay_file: Option<PathBuf>, stream_addr: Option<String>) -> Result<Self> {
        match (replay_file, stream_addr) {
            (Some(_), Some(_)) => Err(anyhow!(
                "specify only --replay-file or --stream, or neither to use the live device, not both"
            )),
            (Some(path), None) => Ok(InputSelection::Replay(path)),
            (None, Some(addr)) => Ok(InputSelection::Stream(addr)),
            (None, None) => Ok(InputSelection::Live),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            InputSelection::Live => "live device".to_string(),
            InputSelection::Replay(path) => format!("replay file {}", path.display()),
            InputSelection::Stream(addr) => format!("stream {}", addr),
        }
    }
}

/// Camera resolution ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraResolution {
    Hd2k,
    Hd1200,
    Hd1080,
    Hd720,
    Svga,
    Vga,
}

impl CameraResolution {
    pub const DEFAULT: CameraResolution = CameraResolution::Hd1080;

    pub fn width(&self) -> u32 {
        match self {
            CameraResolution::Hd2k => 2208,
            CameraResolution::Hd1200 => 1920,
            CameraResolution::Hd1080 => 1920,
            CameraResolution::Hd720 => 1280,
            CameraResolution::Svga => 960,
            CameraResolution::Vga => 672,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            CameraResolution::Hd2k => 1242,
            CameraResolution::Hd1200 => 1200,
            CameraResolution::Hd1080 => 1080,
            CameraResolution::Hd720 => 720,
            CameraResolution::Svga => 600,
            CameraResolution::Vga => 376,
        }
    }

    /// Interpret the `--resolution` flag.
    ///
    /// Unknown non-empty values log a warning and fall back to the default;
    /// an absent/empty flag uses the default silently.
    pub fn from_flag(value: Option<&str>) -> CameraResolution {
        let Some(value) = value else {
            return Self::DEFAULT;
        };
        let upper = value.to_ascii_uppercase();
        if upper.contains("HD2K") {
            CameraResolution::Hd2k
        } else if upper.contains("HD1200") {
            CameraResolution::Hd1200
        } else if upper.contains("HD1080") {
            CameraResolution::Hd1080
        } else if upper.contains("HD720") {
            CameraResolution::Hd720
        } else if upper.contains("SVGA") {
            CameraResolution::Svga
        } else if upper.contains("VGA") {
            CameraResolution::Vga
        } else if !upper.trim().is_empty() {
            log::warn!("no valid resolution entered, using default");
            Self::DEFAULT
        } else {
            Self::DEFAULT
        }
    }
}

/// Per-axis factors mapping source-frame pixels to display pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageScale {
    pub x: f32,
    pub y: f32,
}

impl ImageScale {
    pub const IDENTITY: ImageScale = ImageScale { x: 1.0, y: 1.0 };

    /// Scale from a source resolution to a display resolution.
    pub fn between(source: (u32, u32), display: (u32, u32)) -> ImageScale {
        ImageScale {
            x: display.0 as f32 / source.0 as f32,
            y: display.1 as f32 / source.1 as f32,
        }
    }

    /// Transform a source-frame point into integer display pixels.
    ///
    /// Truncates toward zero; the same transform is used for click matching
    /// and for label placement so the two always agree.
    pub fn to_display(&self, point: (f32, f32)) -> (i32, i32) {
        ((point.0 * self.x) as i32, (point.1 * self.y) as i32)
    }
}

/// Resolved viewer configuration, validated before the loop starts.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub input: InputSelection,
    pub resolution: CameraResolution,
    pub key_wait: Duration,
}

impl ViewerConfig {
    pub fn new(input: InputSelection, resolution: CameraResolution) -> Self {
        Self {
            input,
            resolution,
            key_wait: DEFAULT_KEY_WAIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_and_stream_flags_are_mutually_exclusive() {
        let err = InputSelection::from_flags(
            Some(PathBuf::from("session.jsonl")),
            Some("10.0.0.2:30000".to_string()),
        )
        .unwrap_err();
        assert!(err.to_string().contains("not both"));
    }

    #[test]
    fn flag_resolution_selects_each_mode() {
        assert_eq!(
            InputSelection::from_flags(None, None).unwrap(),
            InputSelection::Live
        );
        assert_eq!(
            InputSelection::from_flags(Some(PathBuf::from("a.jsonl")), None).unwrap(),
            InputSelection::Replay(PathBuf::from("a.jsonl"))
        );
        assert_eq!(
            InputSelection::from_flags(None, Some("host:1".into())).unwrap(),
            InputSelection::Stream("host:1".into())
        );
    }

    #[test]
    fn resolution_ladder_matches_flag_values() {
        assert_eq!(
            CameraResolution::from_flag(Some("HD2K")),
            CameraResolution::Hd2k
        );
        assert_eq!(
            CameraResolution::from_flag(Some("hd720")),
            CameraResolution::Hd720
        );
        assert_eq!(
            CameraResolution::from_flag(Some("SVGA")),
            CameraResolution::Svga
        );
        // HD1200 must win over the VGA substring check.
        assert_eq!(
            CameraResolution::from_flag(Some("HD1200")),
            CameraResolution::Hd1200
        );
    }

    #[test]
    fn unknown_resolution_falls_back_to_default() {
        assert_eq!(
            CameraResolution::from_flag(Some("4K")),
            CameraResolution::DEFAULT
        );
        assert_eq!(CameraResolution::from_flag(None), CameraResolution::DEFAULT);
        assert_eq!(
            CameraResolution::from_flag(Some("")),
            CameraResolution::DEFAULT
        );
    }

    #[test]
    fn image_scale_transforms_and_truncates() {
        let scale = ImageScale::between((1920, 1080), (1280, 720));
        assert!((scale.x - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(scale.to_display((300.0, 300.0)), (200, 200));
        // 100.9 * 1.0 truncates to 100, not 101.
        assert_eq!(ImageScale::IDENTITY.to_display((100.9, 0.2)), (100, 0));
    }
}
