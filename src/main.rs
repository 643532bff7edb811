use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use seti_stats::{report, utils, Args, ClientConfig, StatsClient};

fn run(args: &Args) -> Result<()> {
    let config = ClientConfig::with_base_url(&args.base_url)?;
    let client = StatsClient::from_config(&args.email, &config)
        .with_context(|| "Failed to fetch account statistics")?;

    if args.raw {
        println!("{}", client.raw_body());
    } else if args.json {
        report::print_json(&client.summary(), args.redact)?;
    } else {
        report::print_report(&client.summary(), args.redact);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);

    if let Err(e) = run(&args) {
        error!(action = "exit", component = "main", error = %format!("{:#}", e), "Lookup failed");
        std::process::exit(1);
    }
    Ok(())
}
