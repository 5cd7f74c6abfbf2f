use chip8_vm::emulator::input::{Keypad, NUM_KEYS};
use std::{
    sync::Mutex,
    time::{Duration, Instant},
};

/// A thread-safe record of when each CHIP-8 key was last pressed.
/// Terminals only report key presses, so a key counts as held for
/// `timeout` after its latest press (auto-repeat keeps it fresh).
/// Wrap it in an `std::sync::Arc` and you are good to go.
pub struct KeyBuffer {
    timeout: Duration,
    pressed_at: Mutex<[Option<Instant>; NUM_KEYS]>,
}

impl KeyBuffer {

    /// Create a new `KeyBuffer`, forgetting keypresses that are older than `timeout`.
    pub fn new(timeout: Duration) -> KeyBuffer {
        KeyBuffer {
            timeout,
            pressed_at: Mutex::new([None; NUM_KEYS]),
        }
    }

    /// Record a keypress.
    pub fn press(&self, key: u8) {
        let mut guard = self.pressed_at.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(slot) = guard.get_mut(key as usize) {
            *slot = Some(Instant::now());
        }
    }

    /// The keys pressed recently enough to count as held.
    pub fn snapshot(&self) -> Keypad {
        let guard = self.pressed_at.lock().unwrap_or_else(|e| e.into_inner());
        let mut keypad = Keypad::default();
        for (key, pressed_at) in guard.iter().enumerate() {
            let held = pressed_at.map_or(false, |at| at.elapsed() < self.timeout);
            keypad.set(key as u8, held);
        }
        keypad
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::{sync::Arc, thread};

    #[test]
    fn press_and_snapshot() {
        let kb = Arc::new(KeyBuffer::new(Duration::from_secs(10)));

        let kb_c1 = kb.clone();
        let producer = thread::spawn(move || {
            kb_c1.press(0xA)
        });

        producer.join().unwrap(); // Ensure the press has been recorded
        assert_eq!(kb.snapshot(), Keypad::with_pressed(&[0xA]));
    }

    #[test]
    fn presses_expire() {
        let kb = KeyBuffer::new(Duration::from_millis(10));
        kb.press(0x3);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(kb.snapshot(), Keypad::default());
    }

    #[test]
    fn out_of_range_keys_are_ignored() {
        let kb = KeyBuffer::new(Duration::from_secs(10));
        kb.press(0x10);
        assert_eq!(kb.snapshot(), Keypad::default());
    }
}
