//! Synthetic body source.
//!
//! Deterministic stand-in for a live tracking device: a fixed cast of bodies
//! drifts in small orbits around evenly spaced anchors, and the last body
//! periodically loses tracking so downstream code sees absent reference
//! points. No randomness, so every run and every test observes the same
//! frames.

use anyhow::Result;

use crate::config::CameraResolution;
use crate::source::{SourceStats, TrackedBody};

pub const DEFAULT_BODY_COUNT: usize = 3;

/// Orbit radius as a fraction of frame height.
const ORBIT_RADIUS_FRACTION: f32 = 1.0 / 12.0;
/// Radians advanced per frame.
const ORBIT_STEP: f32 = 0.05;
/// The last body drops out of tracking every this-many frames.
const DROPOUT_PERIOD: u64 = 6;

/// Anchor position for body `index` of `body_count`, spaced evenly across
/// the frame at mid-height.
pub fn body_anchor(resolution: CameraResolution, body_count: usize, index: usize) -> (f32, f32) {
    let width = resolution.width() as f32;
    let height = resolution.height() as f32;
    let x = width * (index as f32 + 1.0) / (body_count as f32 + 1.0);
    (x, height / 2.0)
}

pub struct SyntheticSource {
    resolution: CameraResolution,
    body_count: usize,
    frame_count: u64,
}

impl SyntheticSource {
    pub fn new(resolution: CameraResolution, body_count: usize) -> Self {
        Self {
            resolution,
            body_count,
            frame_count: 0,
        }
    }

    pub fn next_frame(&mut self) -> Result<Vec<TrackedBody>> {
        self.frame_count += 1;
        let radius = self.resolution.height() as f32 * ORBIT_RADIUS_FRACTION;
        let theta = self.frame_count as f32 * ORBIT_STEP;

        let bodies = (0..self.body_count)
            .map(|index| {
                let id = index as u64 + 1;
                let is_dropout_frame = index + 1 == self.body_count
                    && self.body_count > 1
                    && self.frame_count % DROPOUT_PERIOD == 0;
                let reference_point = if is_dropout_frame {
                    None
                } else {
                    let (ax, ay) = body_anchor(self.resolution, self.body_count, index);
                    let phase = theta + index as f32;
                    Some((ax + radius * phase.cos(), ay + radius * phase.sin()))
                };
                TrackedBody {
                    id,
                    reference_point,
                }
            })
            .collect();
        Ok(bodies)
    }

    pub fn is_healthy(&self) -> bool {
        true
    }

    pub fn stats(&self) -> SourceStats {
        SourceStats {
            frames_captured: self.frame_count,
            input: format!("synthetic ({} bodies)", self.body_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable_across_frames() {
        let mut source = SyntheticSource::new(CameraResolution::Hd720, 3);
        let first = source.next_frame().unwrap();
        let second = source.next_frame().unwrap();
        let ids: Vec<u64> = first.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(ids, second.iter().map(|b| b.id).collect::<Vec<_>>());
    }

    #[test]
    fn bodies_stay_near_their_anchors() {
        let resolution = CameraResolution::Hd720;
        let mut source = SyntheticSource::new(resolution, 3);
        let bodies = source.next_frame().unwrap();
        let radius = resolution.height() as f32 * ORBIT_RADIUS_FRACTION;
        for (index, body) in bodies.iter().enumerate() {
            let (ax, ay) = body_anchor(resolution, 3, index);
            let (x, y) = body.reference_point.unwrap();
            assert!((x - ax).abs() <= radius + 1e-3);
            assert!((y - ay).abs() <= radius + 1e-3);
        }
    }

    #[test]
    fn last_body_periodically_loses_tracking() {
        let mut source = SyntheticSource::new(CameraResolution::Hd720, 2);
        let mut saw_dropout = false;
        for frame in 1..=DROPOUT_PERIOD {
            let bodies = source.next_frame().unwrap();
            assert!(bodies[0].reference_point.is_some());
            if frame == DROPOUT_PERIOD {
                assert!(bodies[1].reference_point.is_none());
                saw_dropout = true;
            }
        }
        assert!(saw_dropout);
    }

    #[test]
    fn runs_are_deterministic() {
        let mut a = SyntheticSource::new(CameraResolution::Vga, 4);
        let mut b = SyntheticSource::new(CameraResolution::Vga, 4);
        for _ in 0..20 {
            assert_eq!(a.next_frame().unwrap(), b.next_frame().unwrap());
        }
    }
}
