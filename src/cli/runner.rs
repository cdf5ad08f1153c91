//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, ScrollArgs, DEFAULT_URL};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::scroll::{ScrollRequest, SearchClient};
use serde_json::{json, Value};
use std::fs;
use std::io::Write;
use std::time::Duration;
use tracing::info;

/// Query used when none is given
pub const MATCH_ALL: &str = r#"{"query":{"match_all":{}}}"#;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

/// What a drained scroll produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Summary {
    pages: usize,
    hits: usize,
    total: u64,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing results to stdout
    pub async fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out).await
    }

    /// Run the CLI command, writing results to `out`
    pub async fn run_to(&self, out: &mut impl Write) -> Result<()> {
        let client = SearchClient::new(self.client_config()?)?;

        match &self.cli.command {
            Commands::Scan {
                scroll,
                source_only,
                max_pages,
            } => {
                let summary = scan(&client, scroll, *source_only, *max_pages, out).await?;
                eprintln!(
                    "{}",
                    json!({"pages": summary.pages, "hits": summary.hits, "total": summary.total})
                );
                Ok(())
            }
            Commands::Count { scroll } => {
                let summary = scan(&client, scroll, false, None, &mut std::io::sink()).await?;
                writeln!(
                    out,
                    "{}",
                    json!({"total": summary.total, "received": summary.hits, "pages": summary.pages})
                )?;
                Ok(())
            }
        }
    }

    /// Resolve the client configuration from file and flags
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::load(path)?,
            None => ClientConfig::new(DEFAULT_URL),
        };
        if let Some(url) = &self.cli.url {
            config.base_url.clone_from(url);
        }
        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = timeout;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Build the scroll request described by the arguments
fn scroll_request(args: &ScrollArgs) -> Result<ScrollRequest> {
    let body = match (&args.query, &args.query_file) {
        (Some(query), _) => query.clone(),
        (None, Some(path)) => fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read query file '{}': {}",
                path.display(),
                e
            ))
        })?,
        (None, None) => MATCH_ALL.to_string(),
    };

    Ok(ScrollRequest::new(
        &args.index,
        &args.doc_type,
        Duration::from_secs(args.expiry),
        body,
    ))
}

/// Drain a scroll, writing each hit as one JSON line
async fn scan(
    client: &SearchClient,
    args: &ScrollArgs,
    source_only: bool,
    max_pages: Option<usize>,
    out: &mut impl Write,
) -> Result<Summary> {
    let mut cursor = client.open_scroll(scroll_request(args)?).await?;
    let mut summary = Summary {
        pages: 0,
        hits: 0,
        total: cursor.total(),
    };

    while max_pages.map_or(true, |max| summary.pages < max) {
        let Some(hits) = cursor.next_page().await? else {
            break;
        };
        summary.pages += 1;
        summary.hits += hits.len();

        for hit in hits {
            let line = if source_only {
                hit.source.clone().unwrap_or(Value::Null)
            } else {
                serde_json::to_value(hit).map_err(|e| Error::decode(e.to_string()))?
            };
            writeln!(out, "{line}")?;
        }
    }

    info!(
        index = %args.index,
        pages = summary.pages,
        hits = summary.hits,
        total = summary.total,
        "Scan finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_scroll_request_defaults_to_match_all() {
        let cli = Cli::parse_from(["es-scroll", "scan", "--index", "orders", "--doc-type", "all"]);
        let Commands::Scan { scroll, .. } = &cli.command else {
            panic!("Expected scan");
        };

        let request = scroll_request(scroll).unwrap();
        assert_eq!(request.index, "orders");
        assert_eq!(request.doc_type, "all");
        assert_eq!(request.expiry, Duration::from_secs(60));
        assert_eq!(request.body, MATCH_ALL);
    }

    #[test]
    fn test_scroll_request_from_query_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"query":{{"term":{{"shop_id":3}}}}}}"#).unwrap();

        let args = ScrollArgs {
            index: "orders".to_string(),
            doc_type: "all".to_string(),
            expiry: 30,
            query: None,
            query_file: Some(file.path().to_path_buf()),
        };

        let request = scroll_request(&args).unwrap();
        assert_eq!(request.body, r#"{"query":{"term":{"shop_id":3}}}"#);
        assert_eq!(request.expiry, Duration::from_secs(30));
    }

    #[test]
    fn test_client_config_url_flag_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: http://from-file:9200").unwrap();
        writeln!(file, "timeout_seconds: 5").unwrap();
        let config_path = file.path().to_string_lossy().into_owned();

        let cli = Cli::parse_from([
            "es-scroll",
            "--config",
            config_path.as_str(),
            "--url",
            "http://from-flag:9200",
            "count",
            "-i",
            "orders",
            "-d",
            "all",
        ]);
        let config = Runner::new(cli).client_config().unwrap();
        assert_eq!(config.base_url, "http://from-flag:9200");
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn test_client_config_timeout_flag() {
        let cli = Cli::parse_from(["es-scroll", "-t", "3", "count", "-i", "orders", "-d", "all"]);
        let config = Runner::new(cli).client_config().unwrap();
        assert_eq!(config.base_url, DEFAULT_URL);
        assert_eq!(config.timeout_seconds, 3);
    }

    #[test]
    fn test_client_config_rejects_zero_timeout() {
        let cli = Cli::parse_from(["es-scroll", "-t", "0", "count", "-i", "orders", "-d", "all"]);
        let err = Runner::new(cli).client_config().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_query_and_query_file_conflict() {
        let result = Cli::try_parse_from([
            "es-scroll",
            "scan",
            "-i",
            "orders",
            "-d",
            "all",
            "--query",
            "{}",
            "--query-file",
            "q.json",
        ]);
        assert!(result.is_err());
    }
}
