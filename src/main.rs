// SPDX-License-Identifier: GPL-3.0-or-later
// src/main.rs
//
// Application entry point.

use anyhow::Result;
use clap::Parser;
use quizcrop::cli;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    cli::init_logging(args.verbose);
    if let Err(err) = cli::dispatch(args).await {
        log::error!("{err:#}");
        std::process::exit(1);
    }
    Ok(())
}
