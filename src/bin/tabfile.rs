//! tabfile CLI Binary
//!
//! Command-line interface for filing tabs into bookmark folders.

use clap::Parser;
use std::process;
use tabfile::tooling::{Cli, CliContext};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing tabfile: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command).await {
        Ok(output) => {
            println!("{}", output.text.trim_end());
            if !output.success {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
