use crate::model::error::Result;
use chrono::Utc;
use contagion_data::LiveEvent;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// One line of the event log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoggedEvent {
    pub timestamp: String,
    #[serde(flatten)]
    pub event: LiveEvent,
}

/// Append-only JSON-lines sink for [`LiveEvent`]s.
pub struct HistoryLogger {
    live_file: Option<BufWriter<File>>,
    path: Option<PathBuf>,
}

impl HistoryLogger {
    pub fn new_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            live_file: Some(BufWriter::new(file)),
            path: Some(path.to_path_buf()),
        })
    }

    /// A logger that discards everything.
    pub fn new_dummy() -> Self {
        Self {
            live_file: None,
            path: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.live_file.is_some()
    }

    pub fn log_event(&mut self, event: &LiveEvent) -> Result<()> {
        if let Some(ref mut file) = self.live_file {
            let record = LoggedEvent {
                timestamp: Utc::now().to_rfc3339(),
                event: event.clone(),
            };
            let json = serde_json::to_string(&record)?;
            writeln!(file, "{}", json)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(ref mut file) = self.live_file {
            file.flush()?;
        }
        Ok(())
    }

    /// Reads back every well-formed record written so far.
    pub fn read_all(&mut self) -> Result<Vec<LoggedEvent>> {
        self.flush()?;
        let Some(path) = &self.path else {
            return Ok(Vec::new());
        };
        let reader = BufReader::new(File::open(path)?);
        let mut events = Vec::new();
        for line in reader.lines().map_while(std::io::Result::ok) {
            if let Ok(record) = serde_json::from_str::<LoggedEvent>(&line) {
                events.push(record);
            }
        }
        Ok(events)
    }
}

impl Drop for HistoryLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "Failed to flush event log");
        }
    }
}
