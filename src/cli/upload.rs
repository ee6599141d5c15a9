//! Upload command - run the upload pipeline for one build

use crate::cli::progress::CliProgress;
use crate::cli::style::{Stylize, check};
use anstream::{eprintln, println};
use appcenter_upload::auth::get_auth;
use appcenter_upload::config::{ServiceConfig, UploadConfig};
use appcenter_upload::error::{Error, Result};
use appcenter_upload::pipeline::UploadPipeline;
use appcenter_upload::service::create_service;
use appcenter_upload::types::{SymbolArtifact, SymbolType};
use std::path::PathBuf;
use std::sync::Arc;

/// Parsed `upload` arguments
pub struct UploadArgs {
    pub file: PathBuf,
    pub owner: String,
    pub app: String,
    pub symbols: Option<PathBuf>,
    pub symbol_type: Option<SymbolType>,
    pub groups: Vec<String>,
    pub release_notes: String,
    pub notify_testers: bool,
    pub mandatory: bool,
    pub api_token: Option<String>,
    pub base_url: String,
    pub dry_run: bool,
}

/// Run the upload command
pub async fn run_upload(args: UploadArgs) -> Result<()> {
    let symbols = match (args.symbols, args.symbol_type) {
        (Some(path), Some(symbol_type)) => Some(SymbolArtifact { path, symbol_type }),
        (Some(_), None) => {
            return Err(Error::Config("--symbols requires --symbol-type".to_string()));
        }
        (None, _) => None,
    };

    let config = UploadConfig {
        owner: args.owner,
        app: args.app,
        app_path: args.file,
        symbols,
        destination_groups: args.groups,
        release_notes: args.release_notes,
        notify_testers: args.notify_testers,
        mandatory_update: args.mandatory,
    };
    config.validate()?;

    // A dry run makes no remote calls, so it doesn't need a token
    let token = match get_auth(args.api_token.as_deref()) {
        Ok(auth) => auth.token,
        Err(_) if args.dry_run => String::new(),
        Err(e) => return Err(e),
    };
    let service = create_service(&ServiceConfig::new(token).with_base_url(args.base_url))?;

    println!(
        "Uploading {} to {}",
        config.app_path.display().accent(),
        format!("{}/{}", config.owner, config.app).accent()
    );
    println!();

    let progress = Arc::new(CliProgress::new());
    let pipeline = UploadPipeline::standard(service, progress.clone());
    let request = config.to_request();

    if args.dry_run {
        pipeline.report_dry_run(&request).await;
        progress.finish();
        return Ok(());
    }

    match pipeline.run(request).await {
        Ok(done) => {
            println!();
            let release = done.release_id.as_deref().unwrap_or("unknown");
            println!("{} Uploaded release {}", check(), release.accent());
            if !done.destination_groups.is_empty() {
                println!(
                    "  Distributed to {}",
                    done.destination_groups.join(", ").accent()
                );
            }
            Ok(())
        }
        Err(e) => {
            progress.finish();
            eprintln!();
            eprintln!("{}", "Upload failed".error());
            Err(e)
        }
    }
}
