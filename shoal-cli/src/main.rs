use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use shoal_cli::{parse_point, Order, Runner, Scenario};
use shoal_shared::{Mode, Position};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    None,
    Seek,
    Scatter,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::None => Mode::None,
            ModeArg::Seek => Mode::Seek,
            ModeArg::Scatter => Mode::Scatter,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless flocking simulation", long_about = None)]
struct Args {
    /// Scenario file (JSON). Flags below override its values
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long)]
    frames: Option<u64>,

    /// Viewport width in world units
    #[arg(long)]
    width: Option<f32>,

    /// Viewport height in world units
    #[arg(long)]
    height: Option<f32>,

    /// Number of agents (clamped to 10..=400)
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Seed for reproducible spawns
    #[arg(long)]
    seed: Option<u64>,

    /// Pointer interaction mode
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Seek target as X,Y
    #[arg(short, long, value_parser = parse_point)]
    target: Option<Position>,

    /// Pointer position as X,Y (the predator in scatter mode)
    #[arg(short, long, value_parser = parse_point)]
    pointer: Option<Position>,

    /// Neighbour update order within a frame
    #[arg(long, value_enum)]
    order: Option<Order>,

    /// Write a snapshot every N frames (0 disables output)
    #[arg(long)]
    snapshot_every: Option<u64>,

    /// Output file for JSON-lines snapshots (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn scenario(&self) -> Result<Scenario> {
        let mut scenario = match &self.scenario {
            Some(path) => Scenario::load(path)?,
            None => Scenario::default(),
        };

        if let Some(frames) = self.frames {
            scenario.frames = frames;
        }
        if let Some(width) = self.width {
            scenario.width = width;
        }
        if let Some(height) = self.height {
            scenario.height = height;
        }
        if let Some(count) = self.count {
            scenario.settings.boid_count = count;
        }
        if self.seed.is_some() {
            scenario.seed = self.seed;
        }
        if let Some(mode) = self.mode {
            scenario.mode = mode.into();
        }
        if self.target.is_some() {
            scenario.target = self.target;
        }
        if let Some(pointer) = self.pointer {
            scenario.pointer = pointer;
        }
        if let Some(order) = self.order {
            scenario.order = order;
        }
        if let Some(every) = self.snapshot_every {
            scenario.snapshot_every = every;
        }

        scenario.validate()?;
        Ok(scenario)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let scenario = args.scenario().context("Invalid scenario")?;
    log::info!("Shoal starting: {} frames", scenario.frames);
    if let Some(seed) = scenario.seed {
        log::info!("Seed: {}", seed);
    }

    let mut runner = Runner::new(&scenario);

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            runner.run(scenario.frames, &mut BufWriter::new(file))?;
            log::info!("Snapshots written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            runner.run(scenario.frames, &mut stdout.lock())?;
        }
    }

    let status = runner.status();
    log::debug!("Final status: {:?}", status);

    Ok(())
}
