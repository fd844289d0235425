mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::ffi::OsString;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use porttoggler_api::PortId;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "porttoggler", &mut std::io::stdout());
        return Ok(());
    }

    let (Some(serial), Some(number), Some(action)) =
        (cli.serial_number.as_deref(), cli.switchport.as_deref(), cli.action)
    else {
        Cli::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "--serialnumber, --switchport and --action are required",
            )
            .exit();
    };

    let port = PortId::new(serial, number);
    commands::dispatch(&cli, action, port).await
}

/// Rewrite the two-letter short options (`-SN`, `-SP`) into their long
/// forms, since clap shorts are a single character.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    const ALIASES: [(&str, &str); 2] = [("-SN", "--serialnumber"), ("-SP", "--switchport")];

    args.into_iter()
        .map(|arg| {
            let Some(s) = arg.to_str() else {
                return arg;
            };
            for (short, long) in ALIASES {
                if s == short {
                    return OsString::from(long);
                }
                if let Some(value) = s.strip_prefix(short).and_then(|v| v.strip_prefix('=')) {
                    return OsString::from(format!("{long}={value}"));
                }
            }
            arg
        })
        .collect()
}
