use chip8_vm::emulator::input::{EmulatorInput, Keypad};
use chip8_vm::emulator::output::EmulatorOutput;
use chip8_vm::emulator::screen::{Pixels, Screen, SCREEN_HEIGHT, SCREEN_WIDTH};

use super::key_manager::KeyManager;

use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Write};

pub struct CrosstermInput<'a> {
    key_manager: &'a KeyManager,
}

impl CrosstermInput<'_> {
    pub fn new(key_manager: &KeyManager) -> CrosstermInput {
        CrosstermInput { key_manager }
    }
}

impl EmulatorInput for CrosstermInput<'_> {
    fn poll(&mut self) -> Keypad {
        self.key_manager.keypad()
    }
}

/// Draws each CHIP-8 pixel as two terminal cells inside a frame.
pub struct CrosstermOutput {
    cells: Pixels,
    buzzing: bool,
}

impl CrosstermOutput {
    pub fn new() -> crossterm::Result<CrosstermOutput> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        draw_border()?;
        Ok(CrosstermOutput {
            cells: [[false; SCREEN_WIDTH]; SCREEN_HEIGHT],
            buzzing: false,
        })
    }

    fn draw_changes(&mut self, screen: &Screen) -> crossterm::Result<()> {
        let mut out = stdout();
        for (y, row) in screen.pixels().iter().enumerate() {
            for (x, pixel) in row.iter().enumerate() {
                if self.cells[y][x] != *pixel {
                    self.cells[y][x] = *pixel;
                    queue!(
                        out,
                        cursor::MoveTo(2 * x as u16 + 1, y as u16 + 1),
                        Print(if *pixel { "██" } else { "  " })
                    )?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}

fn draw_border() -> crossterm::Result<()> {
    let mut out = stdout();
    let right = 2 * SCREEN_WIDTH as u16 + 1;
    let bottom = SCREEN_HEIGHT as u16 + 1;
    for y in 0..=bottom {
        for x in 0..=right {
            let c = match (x, y) {
                (0, 0) => '┏',
                (x, 0) if x == right => '┓',
                (0, y) if y == bottom => '┗',
                (x, y) if x == right && y == bottom => '┛',
                (_, 0) => '━',
                (_, y) if y == bottom => '━',
                (0, _) => '┃',
                (x, _) if x == right => '┃',
                _ => continue,
            };
            queue!(out, cursor::MoveTo(x, y), Print(c))?;
        }
    }
    out.flush()?;
    Ok(())
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        let restored = execute!(stdout(), LeaveAlternateScreen, cursor::Show)
            .and_then(|_| terminal::disable_raw_mode());
        if let Err(err) = restored {
            log::error!("Could not restore terminal: {}", err);
        }
    }
}

impl EmulatorOutput for CrosstermOutput {
    fn render(&mut self, screen: &Screen) {
        if let Err(err) = self.draw_changes(screen) {
            log::error!("Could not draw frame: {}", err);
        }
    }

    // No audio, ring the terminal bell when the buzzer starts
    fn buzzer(&mut self, on: bool) {
        if on && !self.buzzing {
            let mut out = stdout();
            if write!(out, "\x07").and_then(|_| out.flush()).is_err() {
                log::warn!("Could not ring the bell");
            }
        }
        self.buzzing = on;
    }
}
