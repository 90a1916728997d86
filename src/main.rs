//! Diagram Constraints CLI
//!
//! Usage:
//!   diagram-constraints [OPTIONS] <SCENE>
//!
//! Options:
//!   --move <NAME:DX,DY>      Translate a shape (repeatable)
//!   --resize <NAME:W,H>      Resize a shape, keeping its north-west corner (repeatable)
//!   --drag <PORT:X,Y>        Drop a port at a new position (repeatable)
//!   --max-iterations <N>     Override the scene's pass cap
//!   --format <text|toml>     Output format
//!   -v, --verbose            Debug logging to stderr
//!   -h, --help               Print help

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use diagram_constraints::{solve_scene, Edit, RunConfig, RunError};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Text,
    Toml,
}

#[derive(Parser)]
#[command(name = "diagram-constraints")]
#[command(about = "Solve the layout constraints of a diagram scene")]
struct Cli {
    /// Scene file (TOML)
    scene: PathBuf,

    /// Translate a shape and everything nested in it
    #[arg(long = "move", value_name = "NAME:DX,DY", value_parser = Edit::parse_move)]
    moves: Vec<Edit>,

    /// Resize a shape, keeping its north-west corner
    #[arg(long = "resize", value_name = "NAME:W,H", value_parser = Edit::parse_resize)]
    resizes: Vec<Edit>,

    /// Drop a port at a new position and let it pick its side again
    #[arg(long = "drag", value_name = "PORT:X,Y", value_parser = Edit::parse_drag)]
    drags: Vec<Edit>,

    /// Override the scene's pass cap
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log solver activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = match fs::read_to_string(&cli.scene) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", cli.scene.display(), e);
            std::process::exit(1);
        }
    };

    // Moves first, then resizes, then drags
    let mut config = RunConfig::new();
    for edit in cli.moves.into_iter().chain(cli.resizes).chain(cli.drags) {
        config = config.with_edit(edit);
    }
    if let Some(max_iterations) = cli.max_iterations {
        config = config.with_max_iterations(max_iterations);
    }

    let (snapshot, report) = match solve_scene(&source, &config) {
        Ok(result) => result,
        Err(RunError::Scene(e)) => {
            let filename = cli.scene.display().to_string();
            eprint!("{}", e.format(&source, &filename));
            eprintln!();
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if !report.converged {
        eprintln!(
            "warning: constraints did not settle within {} passes",
            report.passes
        );
    }

    match cli.format {
        Format::Text => print!("{}", snapshot),
        Format::Toml => match snapshot.to_toml() {
            Ok(text) => print!("{}", text),
            Err(e) => {
                eprintln!("Error: failed to write TOML: {}", e);
                std::process::exit(1);
            }
        },
    }
}

/// `--verbose` turns on debug output; otherwise `RUST_LOG`, defaulting to warnings
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("diagram_constraints=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
