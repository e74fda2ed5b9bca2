use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;
mod output;
mod password;

#[derive(Parser)]
#[command(name = "psafe3")]
#[command(about = "Inspect and deduplicate Password Safe V3 databases")]
#[command(version)]
struct Cli {
    /// Output format
    #[arg(long, global = true)]
    json: bool,

    /// Master password (prompted for when absent)
    #[arg(long, global = true, env = "PSAFE3_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collapse duplicate records into a new database
    Dedup(commands::dedup::DedupArgs),
    /// List the header block and record summaries
    List(commands::list::ListArgs),
    /// Verify the password and integrity of a database
    Check(commands::check::CheckArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("psafe3_cli=debug,psafe3_core=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .init();

    let config = config::Config::load()?;
    let ctx = commands::Context {
        json_output: cli.json || config.output_format.as_deref() == Some("json"),
        password_override: cli.password,
    };

    match cli.command {
        Commands::Dedup(args) => commands::dedup::run(args, &ctx),
        Commands::List(args) => commands::list::run(args, &ctx),
        Commands::Check(args) => commands::check::run(args, &ctx),
    }
}
