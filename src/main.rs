use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use sim_config::client::cli::{self, CliOptions};
use sim_config::logger::{Logger, TracingLogger};
use sim_config::parser::{self, Action};
use sim_config::validator;

fn run_from_input(opts: &CliOptions, logger: &dyn Logger) -> Result<()> {
    logger.info(&format!("Reading configuration from: {}", opts.input.display()));
    let mut config = parser::load_file(&opts.input, opts.format)?;

    logger.info(&format!("Validating configuration version {}", config.version));
    validator::validate_config(&mut config)?;

    let startup_actions = Action::from_entries(&config.startup_actions)?;
    logger.info(&format!(
        "Configuration valid: {} services, {} requests, {} endpoints, {} startup actions",
        config.services.len(),
        config.requests.len(),
        config.endpoints.values().map(|methods| methods.len()).sum::<usize>(),
        startup_actions.len()
    ));

    if opts.print {
        let json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize validated configuration")?;
        println!("{}", json);
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let opts = cli::parse_cli_args();
    let logger = TracingLogger;
    if let Err(err) = run_from_input(&opts, &logger) {
        logger.error(&format!("{:#}", err));
        std::process::exit(1);
    }
}
