#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line entry point for the hexchess terminal client.

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use hexchess_board::Board;
use hexchess_cli::{
    config::Config,
    scene::{build_scene, describe_layout},
    session::{ClickOutcome, Session},
    terminal::TerminalBackend,
};
use hexchess_core::CheckIndicator;
use hexchess_engine::StdioEngine;
use hexchess_rendering::{Color, Presentation, RenderingBackend};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Play three-colour hexagonal chess in the terminal against an external engine.
#[derive(Parser, Debug)]
#[command(name = "hexchess", version)]
#[command(
    about = "Play three-colour hexagonal chess against an external engine",
    long_about = None
)]
struct Cli {
    /// Configuration file; defaults to `hexchess.toml` when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Engine program to spawn instead of the configured one.
    #[arg(long)]
    engine: Option<String>,

    /// When to mark a checked king: `king-with-moves` or `always`.
    #[arg(long, value_parser = parse_check_indicator)]
    check_indicator: Option<CheckIndicator>,

    /// Print the empty board geometry and exit.
    #[arg(long)]
    print_board: bool,

    /// Log filter directives, overriding `RUST_LOG`.
    #[arg(long)]
    log_filter: Option<String>,

    /// Arguments passed to the engine program.
    #[arg(last = true)]
    engine_args: Vec<String>,
}

fn parse_check_indicator(value: &str) -> Result<CheckIndicator, String> {
    match value {
        "king-with-moves" => Ok(CheckIndicator::KingWithMoves),
        "always" => Ok(CheckIndicator::Always),
        other => Err(format!(
            "unknown check indicator `{other}`; expected `king-with-moves` or `always`"
        )),
    }
}

fn init_tracing(directives: Option<&str>) -> Result<()> {
    let filter = match directives {
        Some(directives) => EnvFilter::try_new(directives).context("invalid --log-filter")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

/// Entry point for the hexchess command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_filter.as_deref())?;

    if cli.print_board {
        print!("{}", describe_layout(&Board::new()));
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref())?;
    config.override_engine(cli.engine, cli.engine_args);
    if let Some(policy) = cli.check_indicator {
        config.display.check_indicator = policy;
    }
    config.validate()?;
    let palette = config.palette()?;
    let show_coordinates = config.display.show_coordinates;

    info!(program = %config.engine.program, "starting engine");
    let engine = StdioEngine::spawn(&config.engine.program, &config.engine.args)
        .with_context(|| format!("failed to start engine `{}`", config.engine.program))?;
    let mut session = Session::start(engine, config.display.check_indicator)?;

    let presentation = Presentation::new(
        "hexchess",
        Color::from_rgb_u8(0x20, 0x20, 0x20),
        build_scene(session.board(), &palette, show_coordinates),
    );
    let backend = TerminalBackend::new(io::stdin().lock(), io::stdout())?;
    backend.run(presentation, |input, scene| {
        if let Some(cell) = input.click {
            match session.click(cell)? {
                ClickOutcome::Moved(request) => {
                    debug!(from = %request.from, to = %request.to, "board refreshed after move");
                }
                ClickOutcome::Ignored => debug!(%cell, "click ignored"),
                ClickOutcome::Selected(_) | ClickOutcome::Deselected(_) => {}
            }
        }
        *scene = build_scene(session.board(), &palette, show_coordinates);
        Ok(())
    })
}
