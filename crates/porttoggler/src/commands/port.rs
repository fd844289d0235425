//! Port action handlers.
//!
//! Failure outcomes have already printed their summary line by the time a
//! handler sees them; the handler only turns them into an exit code.

use porttoggler_api::{Outcome, PortUpdate};
use serde_json::Value;
use tracing::{debug, info};

use super::Context;
use super::util;
use crate::error::CliError;
use crate::output;

pub async fn enable(ctx: &Context<'_>) -> Result<(), CliError> {
    set_enabled(ctx, true).await
}

pub async fn disable(ctx: &Context<'_>) -> Result<(), CliError> {
    let prompt = format!(
        "Are you sure you want to disable port number {}?",
        ctx.port.number()
    );
    if !util::confirm(&prompt, ctx.cli.yes)? {
        info!(port = %ctx.port, "disable declined");
        return Err(CliError::Aborted);
    }
    set_enabled(ctx, false).await
}

pub async fn update(ctx: &Context<'_>) -> Result<(), CliError> {
    let Some(ref path) = ctx.cli.from_file else {
        return Err(CliError::Validation(porttoggler_api::Error::InvalidArgument {
            field: "from-file".into(),
            allowed: "a JSON file path".into(),
        }));
    };

    let update = PortUpdate::from_json(&util::read_json_file(path)?)?;
    debug!(port = %ctx.port, ?update, "applying port update");

    let outcome = ctx
        .client
        .update_port(&ctx.settings.api_key, &ctx.port, &update)
        .await
        .map_err(|e| request_error(ctx, e))?;
    let outcome = require_success(ctx, outcome)?;

    if let Some(Value::Object(port)) = outcome.payload() {
        output::print_output(&output::render_port(ctx.cli.output, port)?, ctx.cli.quiet);
    }
    Ok(())
}

pub async fn status(ctx: &Context<'_>) -> Result<(), CliError> {
    let outcome = ctx
        .client
        .get_port_detail(&ctx.settings.api_key, &ctx.port)
        .await
        .map_err(|e| request_error(ctx, e))?;

    let detail = match outcome {
        Outcome::Success {
            payload: Some(Value::Object(port)),
            ..
        } => port,
        Outcome::Success { .. } => return Err(no_data(ctx, None)),
        Outcome::Failure { kind, .. } => return Err(no_data(ctx, Some(kind))),
    };
    let Some(enabled) = detail.get("enabled").and_then(Value::as_bool) else {
        return Err(no_data(ctx, None));
    };

    if matches!(ctx.cli.output, crate::cli::OutputFormat::Text) {
        output::print_output(
            &format!(
                "Port number {} is {}, see details below:\n",
                ctx.port.number(),
                output::state_label(enabled, ctx.color)
            ),
            ctx.cli.quiet,
        );
    }
    output::print_output(&output::render_port(ctx.cli.output, &detail)?, ctx.cli.quiet);
    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────────────

async fn set_enabled(ctx: &Context<'_>, enabled: bool) -> Result<(), CliError> {
    let outcome = ctx
        .client
        .update_port(
            &ctx.settings.api_key,
            &ctx.port,
            &PortUpdate::with_enabled(enabled),
        )
        .await
        .map_err(|e| request_error(ctx, e))?;
    require_success(ctx, outcome)?;
    info!(port = %ctx.port, enabled, "port updated");
    Ok(())
}

fn require_success(ctx: &Context<'_>, outcome: Outcome) -> Result<Outcome, CliError> {
    match outcome {
        Outcome::Failure {
            kind,
            detail,
            payload,
        } => Err(CliError::RequestFailed {
            port: ctx.port.to_string(),
            status: kind.status(),
            kind,
            detail: detail.or(payload).map(|v| v.to_string()),
        }),
        success => Ok(success),
    }
}

fn no_data(ctx: &Context<'_>, kind: Option<porttoggler_api::FailureKind>) -> CliError {
    CliError::NoData {
        port: ctx.port.to_string(),
        kind,
    }
}

/// Give timeouts and connection failures their own diagnostics.
fn request_error(ctx: &Context<'_>, err: porttoggler_api::Error) -> CliError {
    if err.is_timeout() {
        CliError::Timeout {
            seconds: ctx.settings.timeout_secs(),
        }
    } else if err.is_connect() {
        CliError::ConnectionFailed {
            url: ctx.settings.base_url.clone(),
            source: err,
        }
    } else {
        err.into()
    }
}
