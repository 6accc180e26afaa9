//! Run a tile route search from the terminal and draw the result.
//!
//! Run: cargo run --bin gridwalk -- --preset maze --eight

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use tilepath::{
    CandidatePolicy, DirectionSet, Engine, Origin, Position, Relaxation, SearchConfig, SearchPhase,
};
use tilepath_core::Level;
use tilepath_demos::{
    cell, default_destination, default_start, describe_step, preset, preset_names, random_level,
    render,
};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "gridwalk")]
#[command(about = "Step-driven route search over ASCII tile levels")]
struct Args {
    /// Level file: '.' road, '#' block, '~' none, ' ' no tile, 'S'/'D' markers
    #[arg(long, conflicts_with_all = ["preset", "seed"])]
    level: Option<PathBuf>,

    /// Built-in level (open, wall, maze, islands)
    #[arg(long, conflicts_with = "seed")]
    preset: Option<String>,

    /// Generate a random level from this seed
    #[arg(long)]
    seed: Option<u64>,

    /// Random level width in cells
    #[arg(long, default_value_t = 24)]
    width: usize,

    /// Random level height in cells
    #[arg(long, default_value_t = 12)]
    height: usize,

    /// World units between adjacent tile centers
    #[arg(long, default_value_t = 1)]
    spacing: i32,

    /// JSON search configuration; the flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Allow diagonal moves
    #[arg(long)]
    eight: bool,

    /// Accumulate costs and re-parent on cheaper routes
    #[arg(long)]
    conventional: bool,

    /// Append every discovery to the candidate list
    #[arg(long)]
    keep_duplicates: bool,

    /// Give up after this many steps
    #[arg(long)]
    max_steps: Option<usize>,

    /// Agent world position "x,y,z"; defaults to the S marker
    #[arg(long, value_parser = parse_position)]
    from: Option<Position>,

    /// Destination cell "col,row"; defaults to the D marker
    #[arg(long, value_parser = parse_cell)]
    to: Option<(i32, i32)>,

    /// Print every step and wait for Enter before the next one
    #[arg(long)]
    manual: bool,

    /// Log search events
    #[arg(short, long)]
    verbose: bool,
}

fn parse_ints<const N: usize>(s: &str) -> Result<[i32; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {N} comma-separated integers, got {s:?}"));
    }
    let mut out = [0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part.parse().map_err(|e| format!("{part:?}: {e}"))?;
    }
    Ok(out)
}

fn parse_position(s: &str) -> Result<Position, String> {
    let [x, y, z] = parse_ints::<3>(s)?;
    Ok(Position::new(x, y, z))
}

fn parse_cell(s: &str) -> Result<(i32, i32), String> {
    let [col, row] = parse_ints::<2>(s)?;
    Ok((col, row))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level_filter = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level_filter)
        .with_writer(io::stderr)
        .init();

    let level = load_level(&args)?;
    let config = load_config(&args)?;
    log::info!(
        "{} tiles, spacing {}, {:?} directions, {:?} relaxation",
        level.len(),
        level.spacing(),
        config.directions,
        config.relaxation
    );

    let destination = match args.to {
        Some((col, row)) => cell(&level, col, row)
            .ok_or_else(|| anyhow!("no tile at cell {col},{row}"))?,
        None => default_destination(&level).context("level has no road to head for")?,
    };
    let origin = match args.from {
        Some(pos) => Origin::Agent(pos),
        None => Origin::Tile(default_start(&level).context("level has no road to start on")?),
    };

    let mut engine = Engine::new(config);
    engine.set_destination(&level, destination)?;
    engine.start(&level, origin)?;

    if args.manual {
        step_manually(&mut engine, &level)?;
    } else {
        engine.run(&level)?;
    }

    let start = engine.start_tile();
    print!("{}", render(&level, engine.path(), start, Some(destination)));
    match (engine.phase(), engine.path()) {
        (SearchPhase::Found, Some(path)) => println!(
            "route: {} tiles in {} steps ({} tiles scored)",
            path.tile_count(),
            engine.steps(),
            engine.state().touched()
        ),
        _ => println!(
            "no route ({:?} after {} steps)",
            engine.exhaustion(),
            engine.steps()
        ),
    }
    Ok(())
}

fn load_level(args: &Args) -> Result<Level> {
    if let Some(file) = &args.level {
        let text = std::fs::read_to_string(file)
            .with_context(|| format!("reading {}", file.display()))?;
        return Ok(Level::parse(&text, args.spacing)?);
    }
    if let Some(seed) = args.seed {
        return Ok(random_level(seed, args.width, args.height, args.spacing)?);
    }
    let name = args.preset.as_deref().unwrap_or("maze");
    let Some(text) = preset(name) else {
        bail!("unknown preset {name:?}; try one of {}", preset_names());
    };
    Ok(Level::parse(text, args.spacing)?)
}

fn load_config(args: &Args) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(file) => {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("reading {}", file.display()))?;
            serde_json::from_str::<SearchConfig>(&text)
                .with_context(|| format!("parsing {}", file.display()))?
        }
        None => SearchConfig::default(),
    };
    if args.eight {
        config.directions = DirectionSet::Eight;
    }
    if args.conventional {
        config.relaxation = Relaxation::Conventional;
    }
    if args.keep_duplicates {
        config.candidates = CandidatePolicy::KeepDuplicates;
    }
    if let Some(max) = args.max_steps {
        config.max_steps = max;
    }
    Ok(config)
}

/// Print one line per step. Enter advances, `r` runs to the end, `q` stops.
fn step_manually(engine: &mut Engine, level: &Level) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();
    let mut pause = true;
    while engine.phase() == SearchPhase::Searching {
        engine.step(level)?;
        writeln!(stdout, "{}", describe_step(engine, level))?;
        if !pause || engine.phase() != SearchPhase::Searching {
            continue;
        }
        write!(stdout, "[enter/r/q] ")?;
        stdout.flush()?;
        match lines.next().transpose()?.as_deref().map(str::trim) {
            // Input closed: finish without pausing.
            None | Some("r") => pause = false,
            Some("q") => {
                engine.reset();
                break;
            }
            Some(_) => {}
        }
    }
    Ok(())
}
