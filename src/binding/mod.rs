//! Role binding core.
//!
//! This module owns the state that makes the viewer useful: which role the
//! operator is about to assign, the single buffered click, and the registry
//! of numbered role identities bound to tracked-body ids.
//!
//! The binding core is responsible for:
//! - Mapping key presses to the active role selection (or cancellation)
//! - Buffering at most one pending click (most recent wins)
//! - Resolving a click against the current frame's bodies by nearest match
//! - Minting unique, monotonically numbered labels per role category
//!
//! The binding core MUST NOT:
//! - Create or destroy tracked bodies (the source owns their lifetime)
//! - Render anything (presentation reads the registry, nothing more)
//! - Keep state anywhere but the explicitly owned manager/registry structs

mod manager;
mod registry;

pub use manager::BindingManager;
pub use registry::{RoleAssignment, RoleCategory, RoleRegistry};
