use super::key_buffer::KeyBuffer;
use crossterm::event::{poll, read, Event, KeyCode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chip8_vm::emulator::input::Keypad;

const HOLD_TIMEOUT: Duration = Duration::from_millis(250);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The conventional layout, using the left-hand side of a qwerty keyboard.
/// 1 2 3 C / 4 5 6 D / 7 8 9 E / A 0 B F
const KEYMAP: [(char, u8); 16] = [
    ('x', 0x0),
    ('1', 0x1),
    ('2', 0x2),
    ('3', 0x3),
    ('q', 0x4),
    ('w', 0x5),
    ('e', 0x6),
    ('a', 0x7),
    ('s', 0x8),
    ('d', 0x9),
    ('z', 0xA),
    ('c', 0xB),
    ('4', 0xC),
    ('r', 0xD),
    ('f', 0xE),
    ('v', 0xF),
];

/// Shared flags between the manager and its listener thread.
#[derive(Default)]
struct Flags {
    stop: AtomicBool,
    quit: AtomicBool,
}

/// A struct for managing keypresses that will automatically
/// start a thread that grabs keypresses.
pub struct KeyManager {
    flags: Arc<Flags>,
    key_buffer: Arc<KeyBuffer>,
    event_listener: Option<JoinHandle<()>>,
}

impl KeyManager {
    // Start event listener thread
    pub fn new() -> KeyManager {
        let flags = Arc::new(Flags::default());
        let key_buffer = Arc::new(KeyBuffer::new(HOLD_TIMEOUT));
        let event_listener = event_listener(flags.clone(), key_buffer.clone());
        KeyManager {
            flags,
            key_buffer,
            event_listener: Some(event_listener),
        }
    }

    /// The keys currently held
    pub fn keypad(&self) -> Keypad {
        self.key_buffer.snapshot()
    }

    /// Whether escape has been pressed
    pub fn quit_requested(&self) -> bool {
        self.flags.quit.load(Ordering::Relaxed)
    }
}

impl Drop for KeyManager {
    fn drop(&mut self) {
        // Tell the event listener to stop, and wait for it
        self.flags.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.event_listener.take() {
            if handle.join().is_err() {
                log::error!("Key listener panicked");
            }
        }
    }
}

fn key_to_u8(c: char) -> Option<u8> {
    let c = c.to_ascii_lowercase();
    KEYMAP.iter().find(|(k, _)| *k == c).map(|(_, key)| *key)
}

/// Starts a thread that listens for key events and records them in the key buffer.
fn event_listener(flags: Arc<Flags>, key_buffer: Arc<KeyBuffer>) -> JoinHandle<()> {
    thread::spawn(move || {
        while !flags.stop.load(Ordering::Relaxed) {
            // Poll so the stop flag is checked regularly
            match poll(POLL_INTERVAL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    log::error!("Could not poll for events: {}", err);
                    break;
                }
            }

            let event = match read() {
                Ok(event) => event,
                Err(err) => {
                    log::error!("Could not read event: {}", err);
                    break;
                }
            };
            log::debug!("Got event {:?}", event);

            // Investigate the event
            if let Event::Key(key_event) = event {
                match key_event.code {
                    KeyCode::Esc => flags.quit.store(true, Ordering::Relaxed),
                    KeyCode::Char(c) => {
                        if let Some(key) = key_to_u8(c) {
                            key_buffer.press(key);
                        }
                    }
                    _ => {}
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventional_layout() {
        assert_eq!(key_to_u8('1'), Some(0x1));
        assert_eq!(key_to_u8('V'), Some(0xF));
        assert_eq!(key_to_u8('x'), Some(0x0));
        assert_eq!(key_to_u8('p'), None);
    }
}
