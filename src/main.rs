//! appcenter-upload - ship CI build artifacts to App Center
//!
//! CLI binary wrapping the upload pipeline.

use anyhow::Result;
use appcenter_upload::service::DEFAULT_BASE_URL;
use appcenter_upload::types::SymbolType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "appcenter-upload")]
#[command(about = "Upload release binaries and debug symbols to App Center")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a build, commit it and optionally distribute it
    Upload {
        /// Release binary (.apk, .aab, .ipa, .appx, ...)
        file: PathBuf,

        /// Owner (user or organization) of the app
        #[arg(long)]
        owner: String,

        /// App name
        #[arg(long)]
        app: String,

        /// Debug symbols to upload alongside the binary
        #[arg(long, requires = "symbol_type")]
        symbols: Option<PathBuf>,

        /// Kind of debug symbols (apple, android, breakpad, uwp, javascript)
        #[arg(long)]
        symbol_type: Option<SymbolType>,

        /// Distribution group to release to (repeatable)
        #[arg(long = "group")]
        groups: Vec<String>,

        /// Release notes
        #[arg(long, default_value = "")]
        release_notes: String,

        /// Email testers about the new release
        #[arg(long)]
        notify_testers: bool,

        /// Mark the release as a mandatory update
        #[arg(long)]
        mandatory: bool,

        /// API token (defaults to APPCENTER_API_TOKEN)
        #[arg(long)]
        api_token: Option<String>,

        /// API endpoint
        #[arg(long, env = "APPCENTER_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Dry run - show what would be done without making changes
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            file,
            owner,
            app,
            symbols,
            symbol_type,
            groups,
            release_notes,
            notify_testers,
            mandatory,
            api_token,
            base_url,
            dry_run,
        } => {
            let args = cli::UploadArgs {
                file,
                owner,
                app,
                symbols,
                symbol_type,
                groups,
                release_notes,
                notify_testers,
                mandatory,
                api_token,
                base_url,
                dry_run,
            };
            cli::run_upload(args).await?;
        }
    }

    Ok(())
}
