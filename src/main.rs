use anyhow::Context;
use portprobe::cli::{Cli, ScanCommand};
use portprobe::config::Settings;
use portprobe::discovery::PingDiscovery;
use portprobe::output::{self, Palette};
use portprobe::ScanError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            output::print_error(&Palette::new(!cli.no_color), &e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let command = ScanCommand::from_cli(&cli, &settings);
    let palette = command.palette;

    match run(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<ScanError>() {
            Some(err) if !err.is_fatal() => {
                output::print_warning(&palette, &err.to_string());
                output::print_warning(&palette, "Exiting scanner...");
                ExitCode::SUCCESS
            }
            _ => {
                output::print_error(&palette, &format!("{:#}", e));
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(command: ScanCommand) -> anyhow::Result<()> {
    let discovery = PingDiscovery::new();
    command
        .execute(&discovery)
        .await
        .with_context(|| format!("scan of {} failed", command.target))?;
    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
