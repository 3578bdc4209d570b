//! Input event delivery: keyboard codes and click coordinates.
//!
//! The control loop polls exactly one event per cycle with a bounded wait
//! (the wait also paces the loop). Clicks may originate on another thread
//! but arrive serialized through the channel; nothing outside the loop ever
//! touches binding state.

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

/// Raw key code, one byte per key.
pub type KeyCode = u8;

pub const KEY_SURGEON: KeyCode = b's';
pub const KEY_ASSISTANT: KeyCode = b'a';
pub const KEY_NURSE: KeyCode = b'n';
pub const KEY_ESC: KeyCode = 27;
pub const KEY_QUIT: KeyCode = b'q';
pub const KEY_PAUSE: KeyCode = b'm';
pub const KEY_HELP: KeyCode = b'h';

/// One discrete operator action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyCode),
    /// Left click at display-pixel coordinates.
    Click { x: i32, y: i32 },
}

/// Source of operator input.
///
/// `poll` waits up to `timeout` for the next event; `None` as the timeout
/// blocks until an event arrives (used while paused).
pub trait InputSource {
    fn poll(&mut self, timeout: Option<Duration>) -> Option<InputEvent>;
}

/// Pre-scripted input for tests and the demo binary.
///
/// Events are returned in order, one per poll, ignoring the timeout; an
/// exhausted script yields `None` forever.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    events: std::collections::VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _timeout: Option<Duration>) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

/// Line-oriented stdin input for the interactive binary.
///
/// A reader thread parses one command per line and forwards events over a
/// channel; the loop consumes them at its own pace. Commands:
///
/// ```text
/// s | a | n        select Surgeon / Assistant / Nurse
/// esc              cancel the current role selection
/// click X Y        left click at display coordinates
/// help | h         open the binding tutorial
/// m                pause / resume
/// q                quit
/// ```
pub struct StdinInput {
    rx: Receiver<InputEvent>,
}

impl StdinInput {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                match parse_command(&line) {
                    Some(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    None => {
                        if !line.trim().is_empty() {
                            log::warn!("unrecognized input command: {:?}", line.trim());
                        }
                    }
                }
            }
        });
        Self { rx }
    }
}

impl InputSource for StdinInput {
    fn poll(&mut self, timeout: Option<Duration>) -> Option<InputEvent> {
        match timeout {
            Some(timeout) => self.rx.recv_timeout(timeout).ok(),
            None => match self.rx.recv() {
                Ok(event) => Some(event),
                Err(_) => {
                    // stdin closed while blocked; back off so a paused loop
                    // cannot spin hot waiting for input that will never come.
                    thread::sleep(Duration::from_millis(100));
                    None
                }
            },
        }
    }
}

/// Parse one stdin line into an event.
pub fn parse_command(line: &str) -> Option<InputEvent> {
    let mut parts = line.trim().split_whitespace();
    let head = parts.next()?;
    match head.to_ascii_lowercase().as_str() {
        "s" => Some(InputEvent::Key(KEY_SURGEON)),
        "a" => Some(InputEvent::Key(KEY_ASSISTANT)),
        "n" => Some(InputEvent::Key(KEY_NURSE)),
        "esc" => Some(InputEvent::Key(KEY_ESC)),
        "q" | "quit" => Some(InputEvent::Key(KEY_QUIT)),
        "m" => Some(InputEvent::Key(KEY_PAUSE)),
        "h" | "help" => Some(InputEvent::Key(KEY_HELP)),
        "click" => {
            let x = parts.next()?.parse().ok()?;
            let y = parts.next()?.parse().ok()?;
            Some(InputEvent::Click { x, y })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_yields_events_in_order() {
        let mut input = ScriptedInput::new([
            InputEvent::Key(KEY_SURGEON),
            InputEvent::Click { x: 10, y: 20 },
        ]);
        assert_eq!(
            input.poll(Some(Duration::ZERO)),
            Some(InputEvent::Key(KEY_SURGEON))
        );
        assert_eq!(input.poll(None), Some(InputEvent::Click { x: 10, y: 20 }));
        assert_eq!(input.poll(Some(Duration::ZERO)), None);
    }

    #[test]
    fn commands_parse_to_events() {
        assert_eq!(parse_command("s"), Some(InputEvent::Key(KEY_SURGEON)));
        assert_eq!(parse_command("  N "), Some(InputEvent::Key(KEY_NURSE)));
        assert_eq!(parse_command("esc"), Some(InputEvent::Key(KEY_ESC)));
        assert_eq!(
            parse_command("click 120 340"),
            Some(InputEvent::Click { x: 120, y: 340 })
        );
        assert_eq!(parse_command("help"), Some(InputEvent::Key(KEY_HELP)));
        assert_eq!(parse_command("quit"), Some(InputEvent::Key(KEY_QUIT)));
    }

    #[test]
    fn malformed_commands_are_rejected() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("click"), None);
        assert_eq!(parse_command("click ten 20"), None);
        assert_eq!(parse_command("x"), None);
    }
}
