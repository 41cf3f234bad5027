// CLI entry point for the blockfield plugin host.
//
// Loads a scene document, then reads panel messages (one JSON object per
// line) from stdin and runs them through a `PluginSession` until the session
// closes or stdin ends. See `session.rs` for the message handling.
//
// stdout carries only the result: by default the layout array of each
// completed import, with `--events` every `HostEvent` instead. Logs go to
// stderr, filtered by `RUST_LOG` (default `info`).
//
// Usage:
//   blockfield --scene <PATH> [OPTIONS]
//     --scene <PATH>     Scene document (JSON export of a canvas page)
//     --config <PATH>    Layout config JSON (default: stock field)
//     --events           Write every host event, not just layouts
//
// Exits with status 1 if any import failed or the inputs could not be read.

use std::io::{self, BufWriter};
use std::path::PathBuf;

use blockfield_plugin::load::{load_config, load_scene};
use blockfield_plugin::{OutputMode, PluginError, PluginSession, RunSummary};
use tracing::error;
use tracing_subscriber::EnvFilter;

struct Args {
    scene: PathBuf,
    config: Option<PathBuf>,
    mode: OutputMode,
}

fn main() {
    init_logging();
    let args = parse_args();

    match run(&args) {
        Ok(summary) if summary.failures == 0 => {}
        Ok(summary) => {
            error!(failures = summary.failures, "some imports failed");
            std::process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "plugin stopped");
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<RunSummary, PluginError> {
    let scene = load_scene(&args.scene)?;
    let config = load_config(args.config.as_deref())?;
    let mut session = PluginSession::new(scene, config);

    let mut input = io::stdin().lock();
    let mut output = BufWriter::new(io::stdout().lock());
    session.run(&mut input, &mut output, args.mode)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Parse command-line arguments. Uses simple `std::env::args()` matching.
fn parse_args() -> Args {
    let mut scene = None;
    let mut config = None;
    let mut mode = OutputMode::Layouts;
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--scene" => {
                i += 1;
                scene = Some(args.get(i).map(PathBuf::from).unwrap_or_else(|| {
                    eprintln!("--scene requires a path");
                    std::process::exit(1);
                }));
            }
            "--config" => {
                i += 1;
                config = Some(args.get(i).map(PathBuf::from).unwrap_or_else(|| {
                    eprintln!("--config requires a path");
                    std::process::exit(1);
                }));
            }
            "--events" => mode = OutputMode::Events,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(scene) = scene else {
        eprintln!("--scene is required");
        print_usage();
        std::process::exit(1);
    };
    Args {
        scene,
        config,
        mode,
    }
}

fn print_usage() {
    println!("Usage: blockfield --scene <PATH> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --scene <PATH>     Scene document (JSON export of a canvas page)");
    println!("  --config <PATH>    Layout config JSON (default: stock field)");
    println!("  --events           Write every host event, not just layouts");
    println!("  --help, -h         Show this help");
}
