//! Command-line interface implementation

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::compositor::AssetCompositor;
use crate::config::{load_config, merge_cli_overrides, CliOverrides, StencilConfig, MAX_SCALE};
use crate::loader::{load_bitmap, load_masters};
use crate::output::{save_png, scale_image, write_registry};
use crate::recipes::RECIPES;
use crate::registry::AssetRegistry;
use crate::remap::remap_with;

/// Exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// stencilgen - Generate game sprites from palette-indexed master bitmaps
#[derive(Parser)]
#[command(name = "stencilgen")]
#[command(about = "Generate game sprites from palette-indexed master bitmaps")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every recipe and write the generated bitmaps as PNG
    Generate {
        /// Directory holding the master PNGs (default from stencilgen.toml)
        #[arg(long)]
        masters: Option<PathBuf>,

        /// Output directory (default from stencilgen.toml)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Scale output by integer factor (1-16)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SCALE as i64))]
        scale: Option<u32>,

        /// Strict mode: treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Also write the master bitmaps
        #[arg(long)]
        include_masters: bool,

        /// Path to stencilgen.toml (default: search upward from cwd)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Recolor a single bitmap tile by tile
    Remap {
        /// Input PNG whose red channel holds the luminance buckets
        input: PathBuf,

        /// Comma-separated color tables, one per tile; empty items use the fallback
        #[arg(short, long, default_value = "")]
        tables: String,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Scale output by integer factor (1-16)
        #[arg(
            long,
            default_value = "1",
            value_parser = clap::value_parser!(u32).range(1..=MAX_SCALE as i64)
        )]
        scale: u32,

        /// Path to stencilgen.toml for a palette override
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the unpacked palette
    Palette {
        /// Path to stencilgen.toml for a palette override
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List recipes and the ids they produce
    List,
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            masters,
            out,
            scale,
            strict,
            include_masters,
            config,
        } => {
            let overrides = CliOverrides {
                masters,
                out,
                scale,
                strict: strict.then_some(true),
                include_masters: include_masters.then_some(true),
            };
            run_generate(config.as_deref(), &overrides)
        }
        Commands::Remap {
            input,
            tables,
            output,
            scale,
            config,
        } => run_remap(&input, &tables, &output, scale, config.as_deref()),
        Commands::Palette { config } => run_palette(config.as_deref()),
        Commands::List => run_list(),
    }
}

fn init_logging(verbose: u8) {
    // Collected warnings are printed by the commands, so the log stays quiet by default
    let level = match verbose {
        0 => "error",
        1 => "info",
        _ => "debug",
    };
    // RUST_LOG wins when set
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn config_or_exit(path: Option<&Path>) -> Result<StencilConfig, ExitCode> {
    load_config(path).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

/// Execute the generate command
fn run_generate(config_path: Option<&Path>, overrides: &CliOverrides) -> ExitCode {
    let mut config = match config_or_exit(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    merge_cli_overrides(&mut config, overrides);

    // A bad palette literal is fatal before any recipe runs
    let palette = match config.palette() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut registry = AssetRegistry::new();
    if let Err(e) = load_masters(&config.project.masters, &mut registry) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    let report = AssetCompositor::new(palette).run(&mut registry);

    let written = match write_registry(
        &registry,
        &config.project.out,
        config.output.scale,
        config.output.include_masters,
    ) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: Failed to write '{}': {}", config.project.out.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    for path in &written {
        println!("Saved: {}", path.display());
    }

    for warning in &report.warnings {
        eprintln!("Warning: {}", warning.message);
    }

    if config.generate.strict && !report.is_clean() {
        eprintln!("Error: {} warning(s) in strict mode", report.warnings.len());
        return ExitCode::from(EXIT_ERROR);
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the remap command
fn run_remap(
    input: &Path,
    tables: &str,
    output: &Path,
    scale: u32,
    config_path: Option<&Path>,
) -> ExitCode {
    let config = match config_or_exit(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let palette = match config.palette() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let source = match load_bitmap(input) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let tables: Vec<&str> = if tables.is_empty() {
        Vec::new()
    } else {
        tables.split(',').map(str::trim).collect()
    };
    let image = scale_image(&remap_with(&source, &tables, &palette), scale);

    if let Err(e) = save_png(&image, output) {
        eprintln!("Error: Failed to save '{}': {}", output.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved: {}", output.display());
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the palette command
fn run_palette(config_path: Option<&Path>) -> ExitCode {
    let config = match config_or_exit(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let palette = match config.palette() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    for (index, hex) in palette.to_hex_strings().iter().enumerate() {
        let digit = std::char::from_digit(index as u32, 32)
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?');
        println!("{:>2}  {}  #{}", index, digit, hex);
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the list command
fn run_list() -> ExitCode {
    for recipe in RECIPES {
        println!("{:<14} {}", recipe.name, recipe.outputs.join(", "));
    }
    ExitCode::from(EXIT_SUCCESS)
}
