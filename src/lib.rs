//! Manual clinical role binding for multi-person body tracking.
//!
//! An operator watches a live body-tracking feed, presses a key to choose a
//! clinical role (Surgeon, Assistant, Nurse) and clicks on a person to bind
//! that role to the tracked body. Each binding gets a uniquely numbered label
//! (`Surgeon_1`, `Assistant_2`, ...) that follows the body across frames.
//!
//! # Design rules
//!
//! The binding core holds to a few rules by construction:
//!
//! 1. **Single owner**: all binding state (active role, pending click,
//!    counters, id → role map) lives in the control loop's `BindingManager`;
//!    there is no global or shared mutable state.
//! 2. **Monotonic identities**: per-category counters only ever increase, so
//!    a `(category, number)` pair is never reissued, even after a rebind.
//! 3. **One click, one attempt**: at most one click is buffered; a newer
//!    click overwrites an unconsumed one, and every assignment attempt
//!    clears the buffer whether or not it binds anything.
//! 4. **Structured labels**: the role category is carried as data next to
//!    the sequence number; the display string is formatted at render time
//!    and never parsed back.
//!
//! # Module Structure
//!
//! - `binding`: role selection, click resolution, identity registry
//! - `source`: tracked-body sources (synthetic device, replay file, stream)
//! - `input`: keyboard/mouse event delivery
//! - `viewer`: overlay construction and render sinks
//! - `runner`: the synchronous grab/resolve/render/poll cycle
//! - `config`: CLI-facing input selection and resolution handling

pub mod binding;
pub mod config;
pub mod input;
pub mod runner;
pub mod source;
pub mod viewer;

pub use binding::{BindingManager, RoleAssignment, RoleCategory, RoleRegistry};
pub use config::{CameraResolution, ImageScale, InputSelection, ViewerConfig};
pub use input::{InputEvent, InputSource, KeyCode, ScriptedInput, StdinInput};
pub use runner::run_loop;
pub use source::{BodySource, FrameRecord, SourceStats, TrackedBody};
pub use viewer::{
    build_overlay, role_color, Color, ConsoleSink, FrameOverlay, HelpButton, LabelOverlay,
    RenderSink, Viewer,
};
