//! The synchronous viewer cycle.
//!
//! One iteration: acquire a frame, resolve any pending click against it,
//! render, then poll a single input event with a bounded wait (the wait also
//! paces the loop). A failed grab skips the frame work but never the input
//! poll, so quitting and role changes stay responsive when the source stalls
//! or a replay runs out. Teardown is the caller's: `BodySource::close` runs
//! after this returns on every path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::binding::BindingManager;
use crate::input::{InputEvent, InputSource, KEY_HELP, KEY_PAUSE, KEY_QUIT};
use crate::source::BodySource;
use crate::viewer::{build_overlay, RenderSink, Viewer};

/// Cadence of the periodic source-health log line.
const HEALTH_LOG_INTERVAL: Duration = Duration::from_secs(5);

/// Drive the viewer until the operator quits or `shutdown` is raised.
pub fn run_loop<S: RenderSink, I: InputSource>(
    source: &mut BodySource,
    manager: &mut BindingManager,
    viewer: &mut Viewer<S>,
    input: &mut I,
    key_wait: Duration,
    shutdown: &AtomicBool,
) {
    // Paused = block on input instead of waiting out the frame cadence.
    let mut wait = Some(key_wait);
    let mut last_health_log = Instant::now();

    while !shutdown.load(Ordering::Relaxed) {
        if source.grab() {
            let bodies = source.retrieve_bodies();
            manager.try_assign_from_click(&bodies);
            let overlay = build_overlay(
                &bodies,
                source.image_scale(),
                manager.registry(),
                manager.active_role(),
            );
            viewer.render_frame(&overlay);
        }

        if last_health_log.elapsed() >= HEALTH_LOG_INTERVAL {
            let stats = source.stats();
            log::info!(
                "source health={} frames={} input={}",
                source.is_healthy(),
                stats.frames_captured,
                stats.input
            );
            last_health_log = Instant::now();
        }

        match input.poll(wait) {
            Some(InputEvent::Key(KEY_QUIT)) => {
                log::info!("exiting");
                break;
            }
            Some(InputEvent::Key(KEY_PAUSE)) => {
                if wait.is_some() {
                    wait = None;
                    log::info!("pause");
                } else {
                    wait = Some(key_wait);
                    log::info!("restart");
                }
            }
            Some(InputEvent::Key(KEY_HELP)) => viewer.request_help(),
            Some(InputEvent::Key(key)) => {
                if let Some(message) = manager.set_active_role_from_key(key) {
                    log::info!("{}", message);
                }
            }
            Some(InputEvent::Click { x, y }) => viewer.handle_click(x, y, manager),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CameraResolution, ImageScale};
    use crate::input::{ScriptedInput, KEY_SURGEON};
    use crate::source::body_anchor;
    use crate::viewer::{ConsoleSink, FrameOverlay, RenderSink};

    const WAIT: Duration = Duration::from_millis(1);

    struct CountingSink {
        frames: usize,
    }

    impl RenderSink for CountingSink {
        fn render(&mut self, _overlay: &FrameOverlay) {
            self.frames += 1;
        }

        fn show_help(&mut self, _text: &str) {}
    }

    #[test]
    fn scripted_session_binds_the_clicked_body() {
        let resolution = CameraResolution::Hd720;
        let mut source = BodySource::synthetic(resolution, 3);
        let mut manager = BindingManager::new(ImageScale::IDENTITY);
        let mut viewer = Viewer::new(CountingSink { frames: 0 });
        let (ax, ay) = body_anchor(resolution, 3, 0);
        let mut input = ScriptedInput::new([
            InputEvent::Key(KEY_SURGEON),
            InputEvent::Click {
                x: ax as i32,
                y: ay as i32,
            },
            InputEvent::Key(KEY_QUIT),
        ]);

        run_loop(
            &mut source,
            &mut manager,
            &mut viewer,
            &mut input,
            WAIT,
            &AtomicBool::new(false),
        );

        assert_eq!(manager.registry().label_of(1), "Surgeon_1");
        assert!(!manager.has_pending_click());
        assert!(viewer.sink().frames >= 3);
    }

    #[test]
    fn pause_toggle_does_not_wedge_the_loop() {
        let mut source = BodySource::synthetic(CameraResolution::Vga, 1);
        let mut manager = BindingManager::new(ImageScale::IDENTITY);
        let mut viewer = Viewer::new(ConsoleSink);
        let mut input = ScriptedInput::new([
            InputEvent::Key(KEY_PAUSE),
            InputEvent::Key(KEY_PAUSE),
            InputEvent::Key(KEY_QUIT),
        ]);

        run_loop(
            &mut source,
            &mut manager,
            &mut viewer,
            &mut input,
            WAIT,
            &AtomicBool::new(false),
        );
    }

    #[test]
    fn quit_works_even_when_every_grab_fails() {
        let mut source = BodySource::synthetic(CameraResolution::Vga, 1);
        source.close();
        let mut manager = BindingManager::new(ImageScale::IDENTITY);
        let mut viewer = Viewer::new(CountingSink { frames: 0 });
        let mut input = ScriptedInput::new([InputEvent::Key(KEY_QUIT)]);

        run_loop(
            &mut source,
            &mut manager,
            &mut viewer,
            &mut input,
            WAIT,
            &AtomicBool::new(false),
        );

        assert_eq!(viewer.sink().frames, 0);
    }

    #[test]
    fn raised_shutdown_flag_stops_the_loop() {
        let mut source = BodySource::synthetic(CameraResolution::Vga, 1);
        let mut manager = BindingManager::new(ImageScale::IDENTITY);
        let mut viewer = Viewer::new(ConsoleSink);
        let mut input = ScriptedInput::new([]);
        let shutdown = AtomicBool::new(true);

        run_loop(
            &mut source,
            &mut manager,
            &mut viewer,
            &mut input,
            WAIT,
            &shutdown,
        );
    }
}
