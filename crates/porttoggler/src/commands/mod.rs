//! Command dispatch: resolves settings, builds the client, and routes the
//! requested action to its handler.

pub mod port;
pub mod util;

use porttoggler_api::{DashboardClient, PortId};
use tracing::{debug, warn};

use crate::cli::{Action, Cli};
use crate::config::{Settings, is_insecure};
use crate::error::CliError;
use crate::output;

/// Everything a port handler needs for one invocation.
pub struct Context<'a> {
    pub cli: &'a Cli,
    pub settings: Settings,
    pub client: DashboardClient,
    pub port: PortId,
    pub color: bool,
}

/// Route the parsed CLI to the matching handler.
pub async fn dispatch(cli: &Cli, action: Action, port: PortId) -> Result<(), CliError> {
    let settings = Settings::resolve(cli)?;
    if is_insecure(&settings.transport) {
        warn!("TLS certificate verification is disabled");
    }

    let client = DashboardClient::new(&settings.base_url, &settings.transport)?
        .suppress_print(cli.quiet || suppress_summary(cli, action));
    debug!(base_url = %client.base_url(), %port, ?action, "dispatching action");

    let ctx = Context {
        cli,
        settings,
        client,
        port,
        color: output::should_color(cli.color),
    };

    match action {
        Action::Enable => port::enable(&ctx).await,
        Action::Disable => port::disable(&ctx).await,
        Action::Status => port::status(&ctx).await,
        Action::Update => port::update(&ctx).await,
    }
}

/// Structured port output must stay parseable, so the summary line goes.
fn suppress_summary(cli: &Cli, action: Action) -> bool {
    matches!(action, Action::Status | Action::Update)
        && !matches!(cli.output, crate::cli::OutputFormat::Text)
}
