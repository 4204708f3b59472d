// Main entry point for specrelay

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use specrelay::cli::{Cli, Commands};
use specrelay::commands::{self, relay::RelaySettings};
use specrelay::config::Config;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(2);
    }
}

fn run() -> Result<()> {
    // Load configuration from file (if exists)
    let config = Config::load();

    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.verbose {
        "specrelay=debug,warn"
    } else {
        "specrelay=warn,error"
    };

    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .event_format(specrelay::logging::CustomFormatter)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    info!("Starting specrelay v{}", env!("CARGO_PKG_VERSION"));

    if let Some(shell) = &cli.completion {
        return commands::handle_completion(shell);
    }

    if let Some(path) = &cli.init_config {
        let content = Config::default().to_toml();
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    if cli.config {
        print_config(&cli, config.as_ref())?;
        return Ok(());
    }

    match &cli.command {
        Some(Commands::Grep(args)) => commands::handle_grep(args),
        Some(Commands::Filter(args)) => commands::handle_filter(args),
        Some(Commands::Relay(_)) | None => {
            let settings =
                RelaySettings::resolve(cli.get_relay_args(), config.as_ref(), cli.no_color)?;
            let summary = commands::handle_relay(&settings)?;
            if !summary.all_passed() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn print_config(cli: &Cli, config: Option<&Config>) -> Result<()> {
    let settings = RelaySettings::resolve(cli.get_relay_args(), config, cli.no_color)?;

    println!("Current configuration:");
    match &settings.input {
        Some(path) => println!("    Input: {}", path.display()),
        None => println!("    Input: stdin"),
    }
    println!("    Format: {:?}", settings.format);
    match &settings.output {
        Some(path) => println!("    Output: {}", path.display()),
        None => println!("    Output: stdout"),
    }
    println!(
        "    Color: {}",
        if settings.color { "enabled" } else { "disabled" }
    );
    println!(
        "    Grep: {}",
        specrelay::filter::grep_option(&settings.client_args)
    );
    println!("    Framework script: {}", settings.framework_script);
    if let Some(path) = &settings.coverage {
        println!("    Coverage: {}", path.display());
    }

    if config.is_some() {
        println!("\n  Configuration file loaded");
    } else {
        println!("\n  No configuration file loaded");
        println!("  Create one with: specrelay --init-config .specrelayrc.toml");
    }

    Ok(())
}
