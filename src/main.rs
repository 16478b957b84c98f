// src/main.rs

use gemini_key_rotator::cli::{Cli, Commands};
use gemini_key_rotator::config::{load_raw_credentials, validate_credentials};
use gemini_key_rotator::{build_rotator, setup_configuration, Result, RotatorError, StatusReport};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(cli: &Cli) {
    let env_filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    // Logs go to stderr so command output on stdout stays machine-readable.
    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = setup_configuration(cli.config.clone())?;

    match cli.resolved_command() {
        Commands::Status { json } => {
            let rotator = build_rotator(&config)?;
            let report = StatusReport::collect(&rotator);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
        }
        Commands::Validate => {
            let raw = load_raw_credentials(&config.keys_env_var).ok_or(RotatorError::EmptyInput)?;
            let count = validate_credentials(&raw)?;
            println!("{count} API key(s) passed validation");
            if count > 1 {
                println!("Multi-key rotation will be enabled");
            }
        }
        Commands::Rotate { times, report_error } => {
            let rotator = build_rotator(&config)?;
            for step in 1..=times {
                if let Some(message) = &report_error {
                    rotator.report_error(message.as_str());
                }
                let credential = rotator.rotate()?;
                println!("{step}: #{} {}", credential.index, credential.masked());
            }
            print!("{}", StatusReport::collect(&rotator));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => {
            info!("Done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            e.log();
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
