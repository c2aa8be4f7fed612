mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, generate::GenerateArgs, SourceArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "seo-plan",
    about = "Turn a website audit into a priced 12-month SEO service plan",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ./seo-plan.yaml when present)
    #[arg(long, global = true, env = "SEO_PLAN_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a site and write its 12-month plan (JSON, optionally CSV)
    Generate(GenerateArgs),

    /// Audit a site and print the classified findings
    Audit {
        /// Website URL (scheme optional)
        url: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show service tiers and their recurring calendars
    Tiers,

    /// Validate the planner configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins when set; otherwise only warnings and errors are shown.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Generate(args) => cmd::generate::run(config, args, cli.json),
        Commands::Audit { url, source } => cmd::audit::run(config, &url, source, cli.json),
        Commands::Tiers => cmd::tiers::run(cli.json),
        Commands::Config { subcommand } => cmd::config::run(config, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
