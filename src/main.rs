//! # Onepass Main Entry Point
//!
//! Line-driven vault client with an MVVM core.

use anyhow::Result;
use onepass::{cmd_args::CommandLineArgs, config::LOG_LEVEL_ENV_VAR, AppController};
use tracing_subscriber::{filter::LevelFilter, fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.verbose());

    let mut app = AppController::new(&cmd_args)?;

    println!("Onepass vault client");
    println!("Type 'help' for a list of commands, 'quit' to exit\n");

    app.run().await?;

    println!("\nBye!");
    Ok(())
}

fn init_tracing_subscriber(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level))
        .add_directive(quiet("hyper"))
        .add_directive(quiet("reqwest"))
        .add_directive(quiet("rustls"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}

fn quiet(target: &str) -> tracing_subscriber::filter::Directive {
    format!("{target}=warn")
        .parse()
        .unwrap_or_else(|_| LevelFilter::WARN.into())
}
