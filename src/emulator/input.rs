pub const NUM_KEYS: usize = 16;

/// Which of the 16 hexadecimal keys are held down right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keypad([bool; NUM_KEYS]);

impl Keypad {
    pub fn new(keys: [bool; NUM_KEYS]) -> Keypad {
        Keypad(keys)
    }

    /// A keypad with only the given keys held.
    pub fn with_pressed(keys: &[u8]) -> Keypad {
        let mut keypad = Keypad::default();
        for &key in keys {
            keypad.set(key, true);
        }
        keypad
    }

    /// Keys outside 0..=0xF are never pressed.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.0.get(key as usize).copied().unwrap_or(false)
    }

    pub fn set(&mut self, key: u8, pressed: bool) {
        if let Some(slot) = self.0.get_mut(key as usize) {
            *slot = pressed;
        }
    }

    /// The lowest key that is pressed here but was not in `previous`.
    pub fn newly_pressed(&self, previous: &Keypad) -> Option<u8> {
        (0..NUM_KEYS as u8).find(|&key| self.is_pressed(key) && !previous.is_pressed(key))
    }
}

/// Represents an input device that reports the state of keys in the range 0..=0xF.
/// Polled once before every instruction cycle.
pub trait EmulatorInput {
    fn poll(&mut self) -> Keypad;
}

/// An input device that never provides any input
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn poll(&mut self) -> Keypad {
        Keypad::default()
    }
}

/// A fixed keypad is its own input device, which is handy for scripted runs.
impl EmulatorInput for Keypad {
    fn poll(&mut self) -> Keypad {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_keys_are_not_pressed() {
        let mut keypad = Keypad::new([true; NUM_KEYS]);
        keypad.set(0x10, true);
        assert!(keypad.is_pressed(0xF));
        assert!(!keypad.is_pressed(0x10));
        assert!(!keypad.is_pressed(0xFF));
    }

    #[test]
    fn newly_pressed_ignores_held_keys() {
        let previous = Keypad::with_pressed(&[0x2]);
        let current = Keypad::with_pressed(&[0x2, 0x9, 0xC]);
        assert_eq!(current.newly_pressed(&previous), Some(0x9));
        assert_eq!(previous.newly_pressed(&current), None);
        assert_eq!(current.newly_pressed(&current), None);
    }

    #[test]
    fn dummy_input_presses_nothing() {
        assert_eq!(DummyInput.poll(), Keypad::default());
    }
}
