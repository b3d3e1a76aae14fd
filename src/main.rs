//! src/main.rs
//!
//! Entrypoint delegating to `app::run()`.

use clap::Parser;

use trendgraph::app;
use trendgraph::cli::Cli;
use trendgraph::logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;
    app::run(cli)
}
