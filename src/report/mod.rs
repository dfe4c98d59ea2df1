pub mod types;

pub use types::{ContributorReport, PullRequestReport, QueryResult};

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write output file: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Emit a query result.
///
/// The pretty JSON goes to stdout for humans. A single `result=<json>` line
/// is appended to `output_path` for the automation runner; without an output
/// file that line goes to stdout as well.
#[instrument(skip(result))]
pub fn output(result: &QueryResult, output_path: Option<&Path>) -> Result<(), ReportError> {
    let rendered = serde_json::to_string_pretty(result)?;
    println!("{rendered}");

    let line = output_line(&rendered);
    match output_path {
        None => {
            debug!("no output file designated, writing result line to stdout");
            println!("{line}");
        }
        Some(path) => {
            debug!(path = %path.display(), "appending result line to output file");
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{line}")?;
        }
    }
    Ok(())
}

/// Flatten rendered JSON into one `result=` line: newlines become `\n`
/// and double quotes become `\"`.
fn output_line(rendered: &str) -> String {
    let escaped = rendered.replace('\n', "\\n").replace('"', "\\\"");
    format!("result={escaped}")
}
