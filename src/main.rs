//! CLI entry point for the Markov wave-function-collapse generator

use clap::Parser;
use markov_wfc::io::cli::{Cli, Runner};

fn main() -> markov_wfc::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let quiet = cli.quiet;
    let outcome = Runner::new(cli).run()?;

    // Allow print for the final grid, which is the tool's primary output
    #[allow(clippy::print_stdout)]
    if !quiet {
        print!("{}", outcome.grid);
        println!(
            "{} after {} iterations, summary written to {}",
            outcome.report.state,
            outcome.report.stats.iterations,
            outcome.summary_path.display()
        );
    }

    Ok(())
}
