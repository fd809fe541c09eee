//! Publication of the run result to the invoking harness.
//!
//! Success prints the card identifier on stdout and, inside a GitHub Actions
//! job, appends `card-id=<id>` to the file named by `GITHUB_OUTPUT`. Failure
//! emits an `::error::` workflow command carrying the failure reason.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use board::CardId;

/// Name of the action output carrying the card identifier.
pub const CARD_ID_OUTPUT: &str = "card-id";

/// Appends `name=value` to a GitHub Actions output file.
pub fn append_output(path: &Path, name: &str, value: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{name}={value}")
}

/// Publishes the card identifier.
///
/// # Errors
///
/// Fails if `output_file` is given and cannot be appended to.
pub fn publish_card_id(card_id: CardId, output_file: Option<&Path>) -> std::io::Result<()> {
    println!("{card_id}");
    match output_file {
        Some(path) => append_output(path, CARD_ID_OUTPUT, &card_id.to_string()),
        None => Ok(()),
    }
}

/// Formats `message` as an `::error::` workflow command.
///
/// `%`, CR, and LF are percent-encoded so multi-line messages stay one command.
pub fn error_command(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{escaped}")
}
