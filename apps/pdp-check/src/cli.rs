use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "pdp-check")]
#[command(about = "Ask a PDP whether a user may call a URL")]
pub struct Args {
    /// YAML config file (`token`, `pdp_url`, `opa_url`, `timeout_secs`, `default_tenant`)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// User key
    #[arg(short = 'u', long)]
    pub user: String,

    /// URL being accessed
    #[arg(long)]
    pub url: String,

    /// HTTP method of the access
    #[arg(short = 'm', long, default_value = "GET")]
    pub method: String,

    /// Tenant (defaults to `default_tenant` from config)
    #[arg(short = 't', long)]
    pub tenant: Option<String>,

    /// Extra context entry, repeatable
    #[arg(long = "context", value_name = "KEY=VALUE", value_parser = parse_context_entry)]
    pub context: Vec<(String, String)>,

    /// Print the full PDP response as JSON
    #[arg(long)]
    pub detailed: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Args {
    /// Context entries, or `None` when none were given.
    #[must_use]
    pub fn context_map(&self) -> Option<BTreeMap<String, String>> {
        if self.context.is_empty() {
            None
        } else {
            Some(self.context.iter().cloned().collect())
        }
    }
}

fn parse_context_entry(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), value.to_owned())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn context_entries_are_parsed() {
        let args = Args::try_parse_from([
            "pdp-check",
            "--user",
            "jane",
            "--url",
            "/docs/1",
            "--context",
            "ip=10.0.0.1",
            "--context",
            "query=a=b",
        ])
        .unwrap();

        let ctx = args.context_map().unwrap();
        assert_eq!(ctx.get("ip").map(String::as_str), Some("10.0.0.1"));
        assert_eq!(ctx.get("query").map(String::as_str), Some("a=b"));
        assert_eq!(args.method, "GET");
        assert_eq!(args.log_format, LogFormat::Text);
    }

    #[test]
    fn no_context_is_none() {
        let args = Args::try_parse_from(["pdp-check", "-u", "jane", "--url", "/"]).unwrap();

        assert!(args.context_map().is_none());
    }

    #[test]
    fn malformed_context_is_rejected() {
        let result = Args::try_parse_from([
            "pdp-check",
            "-u",
            "jane",
            "--url",
            "/",
            "--context",
            "novalue",
        ]);

        assert!(result.is_err());
    }
}
