use crate::Result;
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Fixed file name for the run log written during execution.
pub const RUN_LOG_FILE: &str = "log_canais_youtube.txt";

/// Append-only log artifact for one run.
///
/// Lines use the `timestamp - LEVEL - message` format and the file is
/// uploaded verbatim to the orchestration platform when the run finishes.
/// Console diagnostics go through `tracing`; this file is the deliverable.
pub struct RunLog {
    file: File,
    path: PathBuf,
}

impl RunLog {
    /// Open the run log in append mode, creating it if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        tracing::debug!("Run log open at {}", path.display());

        Ok(Self { file, path })
    }

    /// Append an INFO line.
    pub fn info(&mut self, message: &str) -> Result<()> {
        self.write_line("INFO", message)
    }

    /// Append an ERROR line.
    pub fn error(&mut self, message: &str) -> Result<()> {
        self.write_line("ERROR", message)
    }

    fn write_line(&mut self, level: &str, message: &str) -> Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(self.file, "{} - {} - {}", timestamp, level, message)?;
        self.file.flush()?;
        Ok(())
    }

    /// Path of the underlying log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Artifact name under which the log is uploaded for a given task.
    pub fn artifact_name(task_id: &str) -> String {
        format!("log_canais_youtube_{}.txt", task_id)
    }
}
