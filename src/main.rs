use anyhow::Result;
use gitply::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    gitply::logging::init(cli.verbose);
    cli.execute()
}
