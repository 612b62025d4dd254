use std::io;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

const SHARE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("share command is empty")]
    EmptyCommand,
    #[error("could not launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("share command timed out")]
    Timeout,
    #[error("share command exited with {0}")]
    Failed(String),
}

/// Runs `command` with the file path appended as the last argument.
///
/// The command is split on whitespace; the first word is the program.
pub async fn share_file(command: &str, path: &Path) -> Result<(), ShareError> {
    let mut words = command.split_whitespace();
    let program = words.next().ok_or(ShareError::EmptyCommand)?;

    let mut child = Command::new(program);
    child.args(words).arg(path).kill_on_drop(true);

    let status = tokio::time::timeout(SHARE_TIMEOUT, child.status())
        .await
        .map_err(|_| ShareError::Timeout)?
        .map_err(|source| ShareError::Launch {
            program: program.to_string(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ShareError::Failed(status.to_string()))
    }
}
