//! Optional run log for debugging analysis behavior
//!
//! Disabled unless `init_logger` runs; every line is timestamped. Used by
//! the driver to record skipped units and run boundaries.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

static LOGGER: Mutex<Option<AnalyzeLogger>> = Mutex::new(None);

pub struct AnalyzeLogger {
    file: File,
}

impl AnalyzeLogger {
    pub fn new(log_path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;
        Ok(Self { file })
    }

    pub fn log(&mut self, message: &str) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let _ = writeln!(self.file, "[{}] {}", timestamp, message);
        let _ = self.file.flush();
    }

    pub fn section(&mut self, title: &str) {
        let separator = "=".repeat(60);
        self.log(&separator);
        self.log(title);
        self.log(&separator);
    }
}

/// Initialize the global logger; returns the log path.
pub fn init_logger(log_path: Option<&Path>) -> std::io::Result<PathBuf> {
    let path = log_path.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        PathBuf::from(format!("/tmp/phlint-{}.log", timestamp))
    });
    let logger = AnalyzeLogger::new(&path)?;
    if let Ok(mut guard) = LOGGER.lock() {
        *guard = Some(logger);
    }
    Ok(path)
}

pub fn log(message: &str) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            logger.log(message);
        }
    }
}

pub fn section(title: &str) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            logger.section(title);
        }
    }
}

pub fn log_analysis_start(unit_count: usize, rule_count: usize) {
    section("ANALYSIS START");
    log(&format!("Analyzing {} units with {} rules", unit_count, rule_count));
}

pub fn log_skipped_unit(file: &Path, reason: &str) {
    log(&format!("SKIPPED {}: {}", file.display(), reason));
}

pub fn log_analysis_complete(diagnostics: usize, skipped: usize) {
    section("ANALYSIS COMPLETE");
    log(&format!("Diagnostics produced: {}", diagnostics));
    log(&format!("Units skipped: {}", skipped));
}
