use brrtdoc::cli::{run_cli, Cli};
use brrtdoc::logging::{init_logging_with_config, LogConfig};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging_with_config(&LogConfig::for_cli(cli.verbose))?;
    run_cli(cli)
}
