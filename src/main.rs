//! quakemap - the live USGS earthquake feed on an interactive map.
//!
//! Fetches the past week of earthquakes once, styles each event by
//! magnitude and depth, and writes or serves a self-contained Leaflet page
//! with a depth legend and a base-layer switcher.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

mod app;
mod cli;
mod client;
mod compose;
mod config;
mod errors;
mod html;
mod layer;
mod models;
mod output;
mod server;
mod style;

use cli::{Cli, Command};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Command::Render(args) => cmd_render(&args),
        Command::Serve(args) => cmd_serve(&args),
    }
}

/// Initialize tracing subscriber.
fn init_tracing(verbose: bool, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Execute the `render` command - one-shot fetch, write the page and exit.
fn cmd_render(args: &cli::RenderArgs) -> Result<()> {
    let config = args.map.to_config();

    let document = match &args.input {
        Some(path) => {
            let body = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            app::start_from_body(&config, &body)
                .with_context(|| format!("failed to load feed from {}", path.display()))?
        }
        None => runtime()?
            .block_on(app::start(&config))
            .context("failed to build earthquake map")?,
    };

    output::write_to(args.output.as_deref(), &document, args.format)
        .context("failed to write map")?;

    if let Some(path) = &args.output {
        tracing::info!("wrote {}", path.display());
    }

    Ok(())
}

/// Execute the `serve` command - one-shot fetch, then serve the page.
fn cmd_serve(args: &cli::ServeArgs) -> Result<()> {
    let config = args.map.to_config();
    let rt = runtime()?;

    let document = rt
        .block_on(app::start(&config))
        .context("failed to build earthquake map")?;
    let state = server::AppState::new(document).context("failed to render map page")?;

    let server_config = server::ServerConfig {
        port: args.port,
        host: args.host.clone(),
    };

    // Print startup message
    let url = format!("http://{}:{}", args.host, args.port);
    println!("\x1b[1m🌍 quakemap\x1b[0m");
    println!("\x1b[2m───────────────────────────────────────\x1b[0m");
    println!("  Local:   \x1b[96m{url}\x1b[0m");
    println!("  Feed:    {}", config.feed.url);
    println!("\x1b[2m───────────────────────────────────────\x1b[0m");
    println!("\x1b[2mPress Ctrl+C to stop\x1b[0m\n");

    // Open browser if requested (using xdg-open/open command)
    if args.open {
        #[cfg(target_os = "linux")]
        let _ = std::process::Command::new("xdg-open").arg(&url).spawn();
        #[cfg(target_os = "macos")]
        let _ = std::process::Command::new("open").arg(&url).spawn();
        #[cfg(target_os = "windows")]
        let _ = std::process::Command::new("cmd").args(["/c", "start", &url]).spawn();
    }

    rt.block_on(server::run_server(server_config, state))
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("failed to create tokio runtime")
}
