use std::time::Duration;

pub const DEFAULT_INSTRUCTIONS_PER_SECOND: u32 = 700;
pub const DEFAULT_FRAMES_PER_SECOND: u32 = 60;

/// How fast the driver runs instructions relative to the 60 Hz timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    pub instructions_per_second: u32,
    pub frames_per_second: u32,
}

impl Default for Clock {
    fn default() -> Self {
        Clock {
            instructions_per_second: DEFAULT_INSTRUCTIONS_PER_SECOND,
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
        }
    }
}

impl Clock {
    pub fn with_instructions_per_second(instructions_per_second: u32) -> Clock {
        Clock {
            instructions_per_second,
            ..Clock::default()
        }
    }

    /// Instructions to run between two timer ticks, at least one.
    pub fn cycles_per_frame(&self) -> u32 {
        (self.instructions_per_second / self.frames_per_second.max(1)).max(1)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.frames_per_second.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(700 => 11 ; "classic rate")]
    #[test_case(600 => 10 ; "even rate")]
    #[test_case(30 => 1 ; "slower than the timers")]
    #[test_case(0 => 1 ; "never zero")]
    fn cycles_per_frame(instructions_per_second: u32) -> u32 {
        Clock::with_instructions_per_second(instructions_per_second).cycles_per_frame()
    }

    #[test]
    fn frame_duration_matches_frame_rate() {
        assert_eq!(Clock::default().frame_duration(), Duration::from_secs(1) / 60);
    }
}
