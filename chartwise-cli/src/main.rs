use anyhow::Result;
use chartwise::logging::setup::{init_logging, LoggingConfig};
use chartwise::logging::LogConfig;
use chartwise_cli::{run_analyze, run_chart, saved_message, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_verbosity(cli.verbose).with_json_format(cli.log_json);
    init_logging(logging).map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))?;

    let log_config = LogConfig::from_verbosity(cli.verbose);
    match &cli.command {
        Command::Analyze(args) => {
            let output = run_analyze(args, log_config).await?;
            print!("{output}");
        }
        Command::Chart(args) => {
            let path = run_chart(args, log_config).await?;
            println!("{}", saved_message(&path));
        }
    }

    Ok(())
}
