use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod config;
mod format;
mod server;
mod util;

const DEFAULT_LOG_FILTER: &str = "articlefmt=info,tower_http=info";

#[derive(Parser)]
#[command(version, about = "Normalize Markdown and HTML articles into highlighted HTML")]
struct Args {
    /// The command to execute
    #[command(subcommand)]
    command: ArticlefmtCommand,
}

#[derive(Parser)]
struct FormatArgs {
    /// The file to format (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Declared content type; may repeat, only the first value is used
    #[arg(short = 't', long = "type")]
    types: Vec<String>,

    /// The path to the configuration file
    #[arg(short, long)]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct InputArgs {
    /// The file to read (reads stdin when omitted)
    file: Option<PathBuf>,
}

#[derive(Parser)]
struct CssArgs {
    /// Theme to generate; defaults to the configured theme
    #[arg(long)]
    theme: Option<String>,

    /// The path to the configuration file
    #[arg(short, long)]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct ServeArgs {
    /// The address to bind to (overrides the config file)
    #[arg(short, long)]
    bind: Option<String>,

    /// The port to bind to (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// The path to the configuration file
    #[arg(short, long)]
    config_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ArticlefmtCommand {
    /// Format content into syntax-highlighted HTML
    Format(FormatArgs),

    /// Print whether content looks like markdown or html
    Classify(InputArgs),

    /// Reduce rendered HTML back to Markdown
    Reduce(InputArgs),

    /// Print the highlighting stylesheet
    Css(CssArgs),

    /// Run the format and revalidation HTTP service
    Serve(ServeArgs),
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match args.command {
        ArticlefmtCommand::Format(args) => {
            commands::format::run(&args).await?;
        }
        ArticlefmtCommand::Classify(args) => {
            commands::classify::run(&args).await?;
        }
        ArticlefmtCommand::Reduce(args) => {
            commands::reduce::run(&args).await?;
        }
        ArticlefmtCommand::Css(args) => {
            commands::css::run(&args).await?;
        }
        ArticlefmtCommand::Serve(args) => {
            commands::serve::run(&args).await?;
        }
    }

    Ok(())
}
