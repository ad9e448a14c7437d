use clap::Parser;
use tidykeep::cli::{Cli, run_cli};
use tidykeep::output::OutputFormatter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_cli(cli) {
        OutputFormatter::error(&e);
    }
}
