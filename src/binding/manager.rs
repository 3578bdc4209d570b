//! Role selection, click buffering, and nearest-body resolution.

use crate::binding::registry::{RoleCategory, RoleRegistry};
use crate::config::ImageScale;
use crate::input::{KeyCode, KEY_ASSISTANT, KEY_ESC, KEY_NURSE, KEY_SURGEON};
use crate::source::TrackedBody;

/// Manages manual role binding between tracked-body ids and numbered
/// clinical roles (`Surgeon_i`, `Assistant_j`, `Nurse_k`).
///
/// All mutable binding state lives here and is driven synchronously by the
/// control loop: key events update the active selection, clicks land in a
/// single-slot buffer, and once per cycle the pending click is resolved
/// against the current frame's bodies.
#[derive(Debug)]
pub struct BindingManager {
    image_scale: ImageScale,
    active: Option<RoleCategory>,
    pending_click: Option<(i32, i32)>,
    registry: RoleRegistry,
}

impl BindingManager {
    pub fn new(image_scale: ImageScale) -> Self {
        Self {
            image_scale,
            active: None,
            pending_click: None,
            registry: RoleRegistry::new(),
        }
    }

    /// Map a key to the active role selection.
    ///
    /// Returns a status line for state-changing keys (including ESC
    /// cancellation); any other key leaves the selection untouched and
    /// returns nothing.
    pub fn set_active_role_from_key(&mut self, key: KeyCode) -> Option<&'static str> {
        match key {
            KEY_SURGEON => {
                self.active = Some(RoleCategory::Surgeon);
                Some("current role set to 'Surgeon', click on a person to bind")
            }
            KEY_ASSISTANT => {
                self.active = Some(RoleCategory::Assistant);
                Some("current role set to 'Assistant', click on a person to bind")
            }
            KEY_NURSE => {
                self.active = Some(RoleCategory::Nurse);
                Some("current role set to 'Nurse', click on a person to bind")
            }
            KEY_ESC => {
                self.active = None;
                Some("role binding cancelled")
            }
            _ => None,
        }
    }

    /// Record a click in display coordinates.
    ///
    /// Unconditionally overwrites any click still waiting in the buffer:
    /// the most recent click wins and there is never a backlog.
    pub fn register_click(&mut self, x: i32, y: i32) {
        self.pending_click = Some((x, y));
        log::debug!("click at ({}, {})", x, y);
    }

    /// Resolve the pending click against this frame's bodies, if possible.
    ///
    /// With no pending click or no active role this is a no-op that leaves
    /// the click buffered (a click made before choosing a role waits until
    /// a role is chosen). Otherwise the click is consumed by this attempt
    /// whether or not anything gets bound: the nearest body by squared
    /// display-pixel distance receives a freshly numbered assignment, bodies
    /// without a usable reference point are never candidates, and an empty
    /// frame simply swallows the click.
    pub fn try_assign_from_click(&mut self, bodies: &[TrackedBody]) {
        let (Some((cx, cy)), Some(category)) = (self.pending_click, self.active) else {
            return;
        };
        if bodies.is_empty() {
            self.pending_click = None;
            log::info!("no bodies available for assignment");
            return;
        }

        let mut best: Option<(u64, i64)> = None;
        for body in bodies {
            let Some(point) = body.reference_point else {
                continue;
            };
            if point.0.is_nan() || point.1.is_nan() {
                continue;
            }
            let (bx, by) = self.image_scale.to_display(point);
            let dx = (bx - cx) as i64;
            let dy = (by - cy) as i64;
            let dist2 = dx * dx + dy * dy;
            // Strict comparison: the first body at the minimum distance wins.
            if best.map_or(true, |(_, d)| dist2 < d) {
                best = Some((body.id, dist2));
            }
        }

        match best {
            Some((body_id, _)) => {
                let assignment = self.registry.generate(category);
                log::info!("assigned role '{}' to body id {}", assignment.label(), body_id);
                self.registry.bind(body_id, assignment);
            }
            None => log::info!("no valid body found near click"),
        }

        // One click = one assignment attempt.
        self.pending_click = None;
    }

    pub fn active_role(&self) -> Option<RoleCategory> {
        self.active
    }

    pub fn has_pending_click(&self) -> bool {
        self.pending_click.is_some()
    }

    /// Read-only view of the binding state for presentation.
    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }
}
