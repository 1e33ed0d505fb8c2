// src/bin/cli.rs
use clap::Parser;
use hub_scrape::cli::{self, Args};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run(Args::parse())
}
