use anyhow::Result;
use clap::Parser;
use clr_trace::cli::{self, Cli};

fn main() -> Result<()> {
    let output = cli::run(Cli::parse())?;
    if !output.is_empty() {
        println!("{output}");
    }
    log::info!("clr-trace {} finished", clr_trace::VERSION);
    Ok(())
}
