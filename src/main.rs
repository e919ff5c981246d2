use anyhow::Result;
use clap::Parser;
use spacecheck::{cli, workflow};

fn main() -> Result<()> {
    let cli_args = cli::Cli::parse();

    // Delegate the main application logic to the workflow module
    workflow::run_spacecheck(cli_args)
}
