//! Tracked-body sources.
//!
//! This module provides the frame-source side of the viewer:
//! - Synthetic device (deterministic generated bodies; live mode and tests)
//! - Replay of a recorded body-frame log (JSON lines)
//! - Network stream of body frames (TCP, same wire format)
//!
//! All sources yield, once per grab, the set of currently tracked bodies.
//! Body ids are assigned by the tracker behind the source and may appear,
//! disappear, or be reused; the binding core only ever reads them.
//!
//! A source is responsible for:
//! - Producing one `Vec<TrackedBody>` per successful grab
//! - Reporting transient acquisition failures as a failed grab (the loop
//!   retries on its next natural cycle)
//! - Releasing its handle on `close`, which must be safe to call on every
//!   exit path

mod replay;
mod stream;
mod synthetic;

pub use replay::ReplaySource;
pub use stream::StreamSource;
pub use synthetic::{body_anchor, SyntheticSource, DEFAULT_BODY_COUNT};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::{CameraResolution, ImageScale, InputSelection};

/// One tracked person as the tracker reports it for a single frame.
///
/// `reference_point` is the 2D anchor keypoint in source-frame pixels; it is
/// absent (or NaN-valued on the wire) when the person is not tracked this
/// frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackedBody {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_point: Option<(f32, f32)>,
}

/// Wire format for one frame of tracked bodies (one JSON object per line in
/// replay files and on network streams).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub bodies: Vec<TrackedBody>,
}

/// Health snapshot for the periodic source log line.
#[derive(Clone, Debug)]
pub struct SourceStats {
    pub frames_captured: u64,
    pub input: String,
}

/// A body source handle: one of the backends behind a uniform
/// grab/retrieve/close surface.
pub struct BodySource {
    backend: Backend,
    resolution: CameraResolution,
    bodies: Vec<TrackedBody>,
    closed: bool,
}

enum Backend {
    Synthetic(SyntheticSource),
    Replay(ReplaySource),
    Stream(StreamSource),
}

impl BodySource {
    /// Open the source selected on the command line.
    ///
    /// Fails before the loop starts if the replay file cannot be opened or
    /// the stream cannot connect; nothing is left to release on failure.
    pub fn open(selection: &InputSelection, resolution: CameraResolution) -> Result<Self> {
        let backend = match selection {
            InputSelection::Live => {
                Backend::Synthetic(SyntheticSource::new(resolution, DEFAULT_BODY_COUNT))
            }
            InputSelection::Replay(path) => Backend::Replay(ReplaySource::open(path)?),
            InputSelection::Stream(addr) => Backend::Stream(StreamSource::connect(addr)?),
        };
        log::info!("body source open: {}", selection.describe());
        Ok(Self {
            backend,
            resolution,
            bodies: Vec::new(),
            closed: false,
        })
    }

    /// Open a synthetic source with an explicit body count (demo and tests).
    pub fn synthetic(resolution: CameraResolution, body_count: usize) -> Self {
        Self {
            backend: Backend::Synthetic(SyntheticSource::new(resolution, body_count)),
            resolution,
            bodies: Vec::new(),
            closed: false,
        }
    }

    /// Acquire the next frame. Returns false on a transient failure (end of
    /// replay, stream hiccup); the caller retries on its next cycle.
    pub fn grab(&mut self) -> bool {
        if self.closed {
            return false;
        }
        let frame = match &mut self.backend {
            Backend::Synthetic(source) => source.next_frame(),
            Backend::Replay(source) => source.next_frame(),
            Backend::Stream(source) => source.next_frame(),
        };
        match frame {
            Ok(bodies) => {
                self.bodies = bodies;
                true
            }
            Err(e) => {
                log::debug!("grab failed: {:#}", e);
                false
            }
        }
    }

    /// Bodies from the last successful grab.
    pub fn retrieve_bodies(&self) -> Vec<TrackedBody> {
        self.bodies.clone()
    }

    pub fn is_healthy(&self) -> bool {
        if self.closed {
            return false;
        }
        match &self.backend {
            Backend::Synthetic(source) => source.is_healthy(),
            Backend::Replay(source) => source.is_healthy(),
            Backend::Stream(source) => source.is_healthy(),
        }
    }

    pub fn stats(&self) -> SourceStats {
        match &self.backend {
            Backend::Synthetic(source) => source.stats(),
            Backend::Replay(source) => source.stats(),
            Backend::Stream(source) => source.stats(),
        }
    }

    /// Release the source. Safe to call more than once.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        if let Backend::Stream(source) = &mut self.backend {
            source.shutdown();
        }
        self.closed = true;
        log::info!("body source closed");
    }

    pub fn display_resolution(&self) -> (u32, u32) {
        (self.resolution.width(), self.resolution.height())
    }

    /// Source-to-display scale. The viewer displays at the source resolution,
    /// so this is identity; the binding math stays scale-agnostic either way.
    pub fn image_scale(&self) -> ImageScale {
        ImageScale::between(
            (self.resolution.width(), self.resolution.height()),
            self.display_resolution(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_record_round_trips_absent_points() {
        let record = FrameRecord {
            bodies: vec![
                TrackedBody {
                    id: 1,
                    reference_point: Some((100.0, 200.0)),
                },
                TrackedBody {
                    id: 2,
                    reference_point: None,
                },
            ],
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("null"));
        let parsed: FrameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn closed_source_refuses_grabs() {
        let mut source = BodySource::synthetic(CameraResolution::Hd720, 2);
        assert!(source.grab());
        source.close();
        assert!(!source.grab());
        assert!(!source.is_healthy());
        source.close();
    }

    #[test]
    fn retrieve_returns_last_grabbed_frame() {
        let mut source = BodySource::synthetic(CameraResolution::Hd720, 3);
        assert!(source.grab());
        let bodies = source.retrieve_bodies();
        assert_eq!(bodies.len(), 3);
        assert_eq!(source.stats().frames_captured, 1);
    }
}
