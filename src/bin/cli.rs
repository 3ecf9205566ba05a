// src/bin/cli.rs
use clap::Parser;

use pogo_cal::cli::{self, Args};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let path = cli::run(&args)?;
    println!("{}", path.display());
    Ok(())
}
