#![deny(unsafe_code)]
//! CLI binary for the heightfield procedural texture system.
//!
//! Subcommands:
//! - `generate <generator>`: fill a field and print its statistics
//! - `sample`: evaluate noise or fBm at a single point
//! - `list`: print available generators and their parameter schemas

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use heightfield_core::{Generator, Seed};
use heightfield_engines::GeneratorKind;
use heightfield_perlin::{NoiseConfiguration, NoiseGenerator, ShuffleMode};
use std::process;

#[derive(Parser)]
#[command(name = "heightfield", about = "Procedural heightfield generator CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log generator activity to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fill a field with a generator and report its statistics.
    Generate {
        /// Generator name ("perlin" or "plasma").
        generator: String,

        /// Field width in cells.
        #[arg(short = 'W', long, default_value_t = 256)]
        width: usize,

        /// Field height in cells.
        #[arg(short = 'H', long, default_value_t = 256)]
        height: usize,

        /// Seed for deterministic output.
        #[arg(long, default_value_t = 42, allow_negative_numbers = true)]
        seed: i64,

        /// Generator parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Evaluate gradient noise at one point.
    Sample {
        #[arg(allow_negative_numbers = true)]
        x: f64,

        #[arg(allow_negative_numbers = true)]
        y: f64,

        /// Third coordinate; selects 3D noise when given.
        #[arg(allow_negative_numbers = true)]
        z: Option<f64>,

        /// Seed for the permutation table.
        #[arg(long, default_value_t = 42, allow_negative_numbers = true)]
        seed: i64,

        /// Sum octaves with fBm instead of a single noise evaluation.
        #[arg(long)]
        fbm: bool,

        #[arg(long, default_value_t = heightfield_perlin::fbm::DEFAULT_OCTAVES, allow_negative_numbers = true)]
        octaves: i32,

        #[arg(long, default_value_t = heightfield_perlin::fbm::DEFAULT_LACUNARITY)]
        lacunarity: f64,

        #[arg(long, default_value_t = heightfield_perlin::fbm::DEFAULT_PERSISTENCE, allow_negative_numbers = true)]
        persistence: f64,

        /// Permutation shuffle ("legacy" or "uniform").
        #[arg(long, default_value = "legacy")]
        shuffle: String,
    },
    /// List available generators.
    List,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let generators = GeneratorKind::list_generators();
            if cli.json {
                let mut schemas = serde_json::Map::new();
                for &name in generators {
                    let gen = GeneratorKind::from_name(name, 1, 1, 0, &serde_json::json!({}))?;
                    schemas.insert(name.to_string(), gen.param_schema());
                }
                let info = serde_json::json!({
                    "generators": generators,
                    "params": schemas,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Generators:");
                for name in generators {
                    println!("  {name}");
                }
            }
        }
        Command::Generate {
            generator,
            width,
            height,
            seed,
            params,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("--params is not valid JSON: {e}")))?;

            let mut gen = GeneratorKind::from_name(&generator, width, height, seed, &params)?;
            gen.generate()?;
            let stats = gen.field().stats();
            let record = Seed::new(&generator, width, height, seed).with_params(gen.params());

            if cli.json {
                let info = serde_json::json!({
                    "seed": record,
                    "stats": {
                        "min": stats.min,
                        "max": stats.max,
                        "mean": stats.mean,
                    },
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "generated {generator} ({width}x{height}, seed {seed}): min {:.6} max {:.6} mean {:.6}",
                    stats.min, stats.max, stats.mean
                );
                println!("params: {}", serde_json::to_string(&record.params)?);
            }
        }
        Command::Sample {
            x,
            y,
            z,
            seed,
            fbm,
            octaves,
            lacunarity,
            persistence,
            shuffle,
        } => {
            let mode = ShuffleMode::from_name(&shuffle).map_err(|e| CliError::Input(e.to_string()))?;
            let noise = NoiseGenerator::with_shuffle(seed, mode)
                .with_config(NoiseConfiguration::new(octaves, lacunarity, persistence));

            let value = match (z, fbm) {
                (Some(z), true) => noise.fbm3d(x, y, z),
                (Some(z), false) => noise.noise3d(x, y, z),
                (None, true) => noise.fbm2d(x, y),
                (None, false) => noise.noise2d(x, y),
            };

            if cli.json {
                let info = serde_json::json!({
                    "x": x,
                    "y": y,
                    "z": z,
                    "seed": seed,
                    "fbm": fbm,
                    "config": noise.config(),
                    "value": value,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{value}");
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
