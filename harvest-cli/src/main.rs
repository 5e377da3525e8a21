//! harvest CLI - runs and maintains the harvest backend
//!
//! Subcommands:
//! - `serve`: HTTP API (settings, referral links, admin maintenance)
//! - `migrate`: create or update the database schema
//! - `defaults`: print the built-in settings table
//! - `completions`: shell completion scripts

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use harvest_server::settings::default_settings;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "harvest",
    author,
    version,
    about = "Backend server and maintenance tools for the harvest farm platform"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create or update the database schema
    Migrate(commands::migrate::MigrateArgs),
    /// Print the default settings table as JSON
    Defaults,
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env never overrides variables already set
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Defaults => run_defaults()?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_defaults() -> Result<()> {
    let json = serde_json::to_string_pretty(&default_settings())
        .context("Failed to serialize default settings")?;
    println!("{}", json);
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
