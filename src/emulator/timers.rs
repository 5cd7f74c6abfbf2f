/// The delay and sound timers, both counting down at 60 Hz.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn new() -> Timers {
        Timers::default()
    }

    /// Count both timers down by one, stopping at zero.
    /// Must be called once per 60 Hz frame, independently of how many
    /// instructions run in between.
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// The buzzer should sound while this is true.
    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}
