//! Binding tutorial shown on demand.

/// Static help panel content, rendered by the active sink when the operator
/// asks for it (help button or help command).
pub const HELP_TEXT: &str = "\
Body Role Binding Tutorial
----------------------------------------
1) All people stand in front of the camera.
2) Press 's' to select the Surgeon role,
   then LEFT-CLICK on a person to bind:
     -> Surgeon_1, Surgeon_2, etc.

3) Press 'a' for Assistant, 'n' for Nurse,
   then LEFT-CLICK on each person to bind:
     -> Assistant_1, Nurse_1, etc.

4) You can press ESC to cancel the current role selection.

5) The label will be shown above the skeleton.

6) You can re-bind a person by selecting a role
   and clicking on them again.

7) Press 'q' in the main window to quit the app.

IMPORTANT:
  If a person leaves the camera view completely
  and then comes back, their tracking ID may change,
  so you may need to bind that person again.";
