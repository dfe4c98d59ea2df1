mod action;
mod config;
mod github;
mod query;
mod report;
mod server;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, info_span, Instrument};
use tracing_subscriber::EnvFilter;

/// Fetch recent pull requests, pull requests in a date range,
/// or contributors for a GitHub repository, over HTTP or as a one-shot run.
#[derive(Parser, Debug)]
#[command(name = "repo-pulse", version, about)]
struct Cli {
    /// Config file path (defaults to .repo-pulse.toml in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the queries as HTTP endpoints
    Serve {
        /// Bind address (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one query and emit the result, e.g. from a scheduled workflow
    Run(action::RunArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    info!("loading configuration");
    let config = config::Config::load(cli.config.as_deref())?;
    debug!(
        api_url = %config.github.api_url,
        authenticated = config.github.token.is_some(),
        date_qualifier = %config.query.date_qualifier,
        "configuration loaded"
    );

    let client = github::GitHubClient::new(&config.github)?;

    match cli.command {
        Command::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let state = server::AppState {
                client,
                date_qualifier: config.query.date_qualifier,
            };
            server::serve(&host, port, state).await?;
        }
        Command::Run(args) => {
            let span = info_span!("run", operation = ?args.operation);
            action::run(&args, &client, config.query.date_qualifier)
                .instrument(span)
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_unknown_operation_is_a_usage_error() {
        let err = Cli::try_parse_from(["repo-pulse", "run", "--operation", "9", "--repo", "o/r"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_ne!(err.exit_code(), 0);
        let rendered = err.render().to_string();
        assert!(rendered.contains("Unknown operation '9'. Use 1, 2, or 3"), "{rendered}");
        assert!(rendered.contains("--operation"), "{rendered}");
    }

    #[test]
    fn test_run_subcommand_parses_flags() {
        let cli = Cli::try_parse_from([
            "repo-pulse",
            "run",
            "--operation",
            "2",
            "--repo",
            "owner/repo",
            "--start-date",
            "2025-08-24",
            "--end-date",
            "2025-08-25",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run subcommand");
        };
        assert_eq!(args.operation, action::Operation::PullRequestsByDate);
        assert_eq!(args.repo.as_deref(), Some("owner/repo"));
        assert_eq!(args.start_date.as_deref(), Some("2025-08-24"));
    }

    #[test]
    fn test_serve_subcommand_overrides() {
        let cli = Cli::try_parse_from(["repo-pulse", "serve", "--port", "8080"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Serve {
                host: None,
                port: Some(8080)
            }
        ));
    }
}
