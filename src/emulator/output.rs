use crate::emulator::screen::Screen;

/// Represents an output device that presents frames, and optionally a buzzer.
pub trait EmulatorOutput {
    /// Called once per frame with the current display buffer.
    fn render(&mut self, screen: &Screen);

    /// Called once per frame; `on` is true while the sound timer is running.
    fn buzzer(&mut self, _on: bool) {}
}

/// A simple output device that keeps the latest frame.
pub struct DummyOutput {
    pub frames: usize,
    pub last_frame: Screen,
    pub buzzing: bool,
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput {
            frames: 0,
            last_frame: Screen::new(),
            buzzing: false,
        }
    }
}

impl Default for DummyOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl EmulatorOutput for DummyOutput {
    fn render(&mut self, screen: &Screen) {
        self.frames += 1;
        self.last_frame = screen.clone();
    }

    fn buzzer(&mut self, on: bool) {
        self.buzzing = on;
    }
}
