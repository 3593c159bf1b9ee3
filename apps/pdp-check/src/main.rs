//! `pdp-check` - one-shot URL authorization check.
//!
//! Usage:
//!   pdp-check --user jane --url /documents/42
//!   pdp-check -c pdp.yaml -u jane --url /documents/42 -m DELETE -t acme
//!   pdp-check -u jane --url /reports --context ip=10.0.0.1 --detailed
//!
//! Exit codes: 0 allowed, 1 denied, 2 error.

mod cli;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use pdp_client::{PdpClientConfig, PdpClientLocal};
use pdp_client_sdk::{CheckUrlRequest, PdpClient, User};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, LogFormat};

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(args: &Args) -> anyhow::Result<bool> {
    let cfg = PdpClientConfig::load(args.config.as_deref()).context("loading configuration")?;
    let client = PdpClientLocal::from_config(&cfg)?;
    let tenant = client.service().tenant_or_default(args.tenant.as_deref());

    tracing::info!(
        backend = client.service().mode().name(),
        user = %args.user,
        url = %args.url,
        "Checking URL access"
    );

    let request = CheckUrlRequest::new(User::new(&args.user), &args.url, &args.method, tenant)
        .with_context(args.context_map());

    if args.detailed {
        let response = client.check_url_detailed(request).await?;
        println!("{}", serde_json::to_string_pretty(&response)?);
        Ok(response.allow)
    } else {
        let allowed = client.check_url(request).await?;
        println!("{}", if allowed { "allowed" } else { "denied" });
        Ok(allowed)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_format);

    match run(&args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
