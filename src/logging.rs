//! File logger
//!
//! The editor owns the terminal, so log records cannot go to stdout or
//! stderr. When a log file is configured, records are appended to it one
//! line each: `<unix seconds> <LEVEL> <target>: <message>`.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::error::Result;

/// Appends formatted records to a file
struct FileLogger {
    file: Mutex<File>,
    level: LevelFilter,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let entry = format_entry(unix_seconds(), record.level(), record.target(), record.args());
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{}", entry);
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Install the file logger as the global logger
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    log::set_boxed_logger(Box::new(FileLogger {
        file: Mutex::new(file),
        level,
    }))?;
    log::set_max_level(level);
    Ok(())
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn format_entry(timestamp: u64, level: Level, target: &str, args: &fmt::Arguments) -> String {
    format!("{} {:<5} {}: {}", timestamp, level, target, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_entry() {
        let entry = format_entry(1_700_000_000, Level::Warn, "codepad::fileops", &format_args!("deleted {}", "a.txt"));
        assert_eq!(entry, "1700000000 WARN  codepad::fileops: deleted a.txt");
    }

    #[test]
    fn test_logger_filters_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codepad.log");
        let file = OpenOptions::new().create(true).append(true).open(&path).unwrap();
        let logger = FileLogger {
            file: Mutex::new(file),
            level: LevelFilter::Info,
        };

        logger.log(&Record::builder().level(Level::Info).target("t").args(format_args!("kept")).build());
        logger.log(&Record::builder().level(Level::Debug).target("t").args(format_args!("dropped")).build());
        logger.flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("INFO  t: kept"));
        assert!(!contents.contains("dropped"));
        assert_eq!(contents.lines().count(), 1);
    }
}
