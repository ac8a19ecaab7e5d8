mod actions;
mod cli;
mod config;
mod error;
mod types;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use config::Opts;
use lazy_static::lazy_static;

// Initialize writer
lazy_static! {
    static ref WRITER: cli::Writer = cli::Writer::new();
}

/// Exit codes:
/// 1 => program screwed up
/// 2 => user cancelled operation
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let opts = Opts::parse();
    cli::set_verbose(opts.verbose);

    if let Err(err) = try_main(&opts).await {
        error!("{}", err.to_string());
        err.chain().skip(1).for_each(|cause| {
            due_to!("{}", cause);
        });
        std::process::exit(1);
    }
}

async fn try_main(opts: &Opts) -> Result<()> {
    // Nothing to clean up, just leave
    ctrlc::set_handler(|| {
        warn!("Interrupted by user");
        std::process::exit(2);
    })
    .context("Failed to set up signal handler")?;

    actions::compare_release(opts).await
}
