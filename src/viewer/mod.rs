//! Presentation: overlay construction, render sinks, and click routing.
//!
//! The viewer reads binding state, never mutates it. Each cycle it turns the
//! current bodies plus the registry into a `FrameOverlay` (labels, colors,
//! people count, active-role status) and hands that to whatever `RenderSink`
//! is plugged in. Clicks inside the help-button region request the tutorial
//! panel; clicks anywhere else are forwarded to the binding manager.

mod help;

pub use help::HELP_TEXT;

use crate::binding::{BindingManager, RoleCategory, RoleRegistry};
use crate::config::ImageScale;
use crate::source::TrackedBody;

/// Label colors, BGR channel order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Color {
    pub const RED: Color = Color { b: 0, g: 0, r: 255 };
    pub const BLUE: Color = Color { b: 255, g: 0, r: 0 };
    pub const GREEN: Color = Color { b: 0, g: 255, r: 0 };
    pub const YELLOW: Color = Color {
        b: 0,
        g: 255,
        r: 255,
    };
}

/// Label color for a bound category. Unbound bodies render yellow.
///
/// The category comes straight from the assignment's structured field; the
/// label string is never inspected to recover it.
pub fn role_color(category: Option<RoleCategory>) -> Color {
    match category {
        Some(RoleCategory::Surgeon) => Color::RED,
        Some(RoleCategory::Assistant) => Color::BLUE,
        Some(RoleCategory::Nurse) => Color::GREEN,
        None => Color::YELLOW,
    }
}

/// One rendered label: the role (or raw-id fallback) drawn above a body.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelOverlay {
    pub body_id: u64,
    /// Display-pixel position of the label anchor.
    pub position: (i32, i32),
    pub text: String,
    pub color: Color,
}

/// Everything the sink needs to draw for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameOverlay {
    pub people_count: usize,
    pub active_role: Option<RoleCategory>,
    pub labels: Vec<LabelOverlay>,
}

/// Vertical offset lifting the label above the body's anchor point.
const LABEL_OFFSET_Y: i32 = 10;

/// Build the overlay for one frame.
///
/// Every body counts toward `people_count`, but only bodies with a usable
/// reference point get a label (there is nowhere to anchor the others).
pub fn build_overlay(
    bodies: &[TrackedBody],
    scale: ImageScale,
    registry: &RoleRegistry,
    active_role: Option<RoleCategory>,
) -> FrameOverlay {
    let labels = bodies
        .iter()
        .filter_map(|body| {
            let point = body.reference_point?;
            if point.0.is_nan() || point.1.is_nan() {
                return None;
            }
            let (x, y) = scale.to_display(point);
            Some(LabelOverlay {
                body_id: body.id,
                position: (x, y - LABEL_OFFSET_Y),
                text: registry.label_of(body.id),
                color: role_color(registry.assignment_of(body.id).map(|a| a.category)),
            })
        })
        .collect();

    FrameOverlay {
        people_count: bodies.len(),
        active_role,
        labels,
    }
}

/// Where rendered frames and the help panel go.
pub trait RenderSink {
    fn render(&mut self, overlay: &FrameOverlay);
    fn show_help(&mut self, text: &str);
}

/// Log-backed sink for headless runs.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl RenderSink for ConsoleSink {
    fn render(&mut self, overlay: &FrameOverlay) {
        let labels: Vec<String> = overlay
            .labels
            .iter()
            .map(|label| {
                format!(
                    "{}@({},{})",
                    label.text, label.position.0, label.position.1
                )
            })
            .collect();
        log::debug!(
            "people detected: {} active_role={} labels=[{}]",
            overlay.people_count,
            overlay
                .active_role
                .map(|role| role.as_str())
                .unwrap_or("none"),
            labels.join(", ")
        );
    }

    fn show_help(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// In-frame help button region (top-left corner of the display).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HelpButton {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Default for HelpButton {
    fn default() -> Self {
        HelpButton {
            x: 20,
            y: 70,
            w: 170,
            h: 40,
        }
    }
}

impl HelpButton {
    /// Inclusive bounds on all edges.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }
}

/// Viewer shell: routes clicks and drives a render sink.
pub struct Viewer<S: RenderSink> {
    sink: S,
    help_button: HelpButton,
    help_requested: bool,
}

impl<S: RenderSink> Viewer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            help_button: HelpButton::default(),
            help_requested: false,
        }
    }

    /// Route one click: the help button opens the tutorial, anything else is
    /// a binding click for the manager.
    pub fn handle_click(&mut self, x: i32, y: i32, manager: &mut BindingManager) {
        if self.help_button.contains(x, y) {
            self.help_requested = true;
            log::info!("binding help requested");
        } else {
            manager.register_click(x, y);
        }
    }

    /// Open the tutorial on the next render (keyboard path).
    pub fn request_help(&mut self) {
        self.help_requested = true;
    }

    /// Show the help panel if requested since the last frame, then render.
    pub fn render_frame(&mut self, overlay: &FrameOverlay) {
        if self.help_requested {
            self.sink.show_help(HELP_TEXT);
            self.help_requested = false;
        }
        self.sink.render(overlay);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::RoleRegistry;

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<FrameOverlay>,
        help_shown: usize,
    }

    impl RenderSink for RecordingSink {
        fn render(&mut self, overlay: &FrameOverlay) {
            self.frames.push(overlay.clone());
        }

        fn show_help(&mut self, _text: &str) {
            self.help_shown += 1;
        }
    }

    fn body(id: u64, x: f32, y: f32) -> TrackedBody {
        TrackedBody {
            id,
            reference_point: Some((x, y)),
        }
    }

    #[test]
    fn overlay_labels_bound_and_unbound_bodies() {
        let mut registry = RoleRegistry::new();
        let surgeon = registry.generate(RoleCategory::Surgeon);
        registry.bind(1, surgeon);

        let overlay = build_overlay(
            &[body(1, 100.0, 100.0), body(2, 300.0, 200.0)],
            ImageScale::IDENTITY,
            &registry,
            Some(RoleCategory::Surgeon),
        );

        assert_eq!(overlay.people_count, 2);
        assert_eq!(overlay.labels.len(), 2);
        assert_eq!(overlay.labels[0].text, "Surgeon_1");
        assert_eq!(overlay.labels[0].color, Color::RED);
        assert_eq!(overlay.labels[0].position, (100, 90));
        assert_eq!(overlay.labels[1].text, "ID:2");
        assert_eq!(overlay.labels[1].color, Color::YELLOW);
    }

    #[test]
    fn untracked_bodies_count_but_get_no_label() {
        let registry = RoleRegistry::new();
        let overlay = build_overlay(
            &[
                body(1, 10.0, 10.0),
                TrackedBody {
                    id: 2,
                    reference_point: None,
                },
                TrackedBody {
                    id: 3,
                    reference_point: Some((f32::NAN, 5.0)),
                },
            ],
            ImageScale::IDENTITY,
            &registry,
            None,
        );
        assert_eq!(overlay.people_count, 3);
        assert_eq!(overlay.labels.len(), 1);
    }

    #[test]
    fn label_positions_follow_the_display_scale() {
        let registry = RoleRegistry::new();
        let overlay = build_overlay(
            &[body(1, 200.0, 200.0)],
            ImageScale { x: 0.5, y: 0.5 },
            &registry,
            None,
        );
        assert_eq!(overlay.labels[0].position, (100, 90));
    }

    #[test]
    fn colors_come_from_the_assignment_category() {
        assert_eq!(role_color(Some(RoleCategory::Surgeon)), Color::RED);
        assert_eq!(role_color(Some(RoleCategory::Assistant)), Color::BLUE);
        assert_eq!(role_color(Some(RoleCategory::Nurse)), Color::GREEN);
        assert_eq!(role_color(None), Color::YELLOW);
    }

    #[test]
    fn help_button_bounds_are_inclusive() {
        let button = HelpButton::default();
        assert!(button.contains(20, 70));
        assert!(button.contains(190, 110));
        assert!(!button.contains(19, 70));
        assert!(!button.contains(191, 110));
        assert!(!button.contains(20, 111));
    }

    #[test]
    fn clicks_route_to_help_or_binding() {
        let mut viewer = Viewer::new(RecordingSink::default());
        let mut manager = BindingManager::new(ImageScale::IDENTITY);

        viewer.handle_click(30, 80, &mut manager);
        assert!(!manager.has_pending_click());

        viewer.handle_click(400, 300, &mut manager);
        assert!(manager.has_pending_click());

        // Help shows once on the next render, then stays closed.
        viewer.render_frame(&FrameOverlay::default());
        viewer.render_frame(&FrameOverlay::default());
        assert_eq!(viewer.sink().help_shown, 1);
        assert_eq!(viewer.sink().frames.len(), 2);
    }
}
