use std::path::PathBuf;

use structopt::StructOpt;

use chip8_vm::emulator::{Clock, Emulator, QuirkProfile, Quirks, SpriteEdges};

/// Runs a program without input for a number of frames, then prints the screen.
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

    /// Number of 60 Hz frames to run
    #[structopt(long, default_value = "600")]
    frames: u32,

    /// Seed for the random number generator
    #[structopt(long)]
    seed: Option<u64>,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    let mut quirks = Quirks::from(opt.quirks);
    if opt.wrap_sprites {
        quirks = quirks.with_sprite_edges(SpriteEdges::Wrap);
    }

    // Load instructions into emulator memory
    let mut emulator = Emulator::new().with_quirks(quirks);
    if let Some(seed) = opt.seed {
        emulator = emulator.with_seed(seed);
    }
    emulator.load(&program)?;

    // Run as fast as possible, the timers still tick once per frame
    let cycles = Clock::with_instructions_per_second(opt.ips).cycles_per_frame();
    let mut outcome = Ok(());
    for frame in 0..opt.frames {
        if let Err(err) = emulator.run_frame(cycles) {
            log::error!("Halted in frame {} at {:#05x}: {}", frame, emulator.pc(), err);
            outcome = Err(err);
            break;
        }
    }

    print!("{}", emulator.screen());
    Ok(outcome?)
}
