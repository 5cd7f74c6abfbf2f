use std::path::PathBuf;
use std::time::Instant;

use structopt::StructOpt;

use chip8_vm::emulator::{Clock, Emulator, EmulatorInput, EmulatorOutput, QuirkProfile, Quirks, SpriteEdges};

mod crossterm_io;
mod key_buffer;
mod key_manager;
use crossterm_io::{CrosstermInput, CrosstermOutput};
use key_manager::KeyManager;

/// The program options.
#[derive(StructOpt, Debug)]
struct Opt {
    /// Interpreter quirks to emulate (modern, vip)
    #[structopt(short, long, default_value = "modern")]
    quirks: QuirkProfile,

    /// Wrap sprites around the screen edges instead of clipping them
    #[structopt(long)]
    wrap_sprites: bool,

    /// Instructions executed per second
    #[structopt(long, default_value = "700")]
    ips: u32,

    /// Seed for the random number generator
    #[structopt(long)]
    seed: Option<u64>,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

impl Opt {
    fn quirks(&self) -> Quirks {
        let quirks = Quirks::from(self.quirks);
        if self.wrap_sprites {
            quirks.with_sprite_edges(SpriteEdges::Wrap)
        } else {
            quirks
        }
    }
}

fn run<I: EmulatorInput, O: EmulatorOutput>(
    emulator: &mut Emulator<I, O>,
    key_manager: &KeyManager,
    clock: Clock,
) -> chip8_vm::emulator::Result<()> {
    let cycles = clock.cycles_per_frame();
    while !key_manager.quit_requested() {
        let frame_start = Instant::now();
        emulator.run_frame(cycles)?;
        if let Some(remaining) = clock.frame_duration().checked_sub(frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {

    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?} with {:?}", &opt.input, opt.quirks());
    let program = std::fs::read(&opt.input)?;

    let key_manager = KeyManager::new();

    // Load instructions into emulator memory
    let mut emulator = Emulator::with_io(
        CrosstermInput::new(&key_manager),
        CrosstermOutput::new()?
    ).with_quirks(opt.quirks());
    if let Some(seed) = opt.seed {
        emulator = emulator.with_seed(seed);
    }
    emulator.load(&program)?;

    // Start execution
    let outcome = run(&mut emulator, &key_manager, Clock::with_instructions_per_second(opt.ips));

    // Restore the terminal before reporting anything
    drop(emulator);
    if let Err(err) = &outcome {
        log::error!("Halted: {}", err);
    }
    Ok(outcome?)
}
