//! macpilot: drive macOS applications from the command line.

mod commands;
mod registry;

use std::process::ExitCode;

use macpilot::Automation;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::registry::CliError;

const ACCESSIBILITY_HELP: &str = "\
Accessibility permission is required.

Setup:
  1. System Settings > Privacy & Security > Accessibility
  2. Click '+' to add your terminal app
     (Terminal.app, iTerm, Warp, etc.)
  3. Enable the toggle to grant permission";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let registry = commands::registry();

    let command = match args.first() {
        None => {
            println!("{}", registry.usage_listing());
            return ExitCode::SUCCESS;
        }
        Some(arg) if arg == "--help" => {
            println!("{}", registry.usage_listing());
            return ExitCode::SUCCESS;
        }
        Some(command) => command.clone(),
    };

    debug!(%command, "dispatching");
    match registry
        .dispatch(Automation::new(), &command, &args[1..])
        .await
    {
        Ok(code) => ExitCode::from(code.clamp(0, u8::MAX as i32) as u8),
        Err(CliError::UnknownCommand(name)) => {
            eprintln!("Unknown command: {name}");
            eprintln!("Use --help to see available commands.");
            ExitCode::FAILURE
        }
        Err(CliError::MissingArgument { usage }) => {
            eprintln!("Usage: {usage}");
            ExitCode::FAILURE
        }
        Err(CliError::AccessibilityDenied) => {
            eprintln!("{ACCESSIBILITY_HELP}");
            ExitCode::FAILURE
        }
        Err(CliError::Command(error)) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
