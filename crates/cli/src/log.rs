use std::{
    collections::VecDeque,
    io::ErrorKind,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

const MAX_ENTRIES: usize = 100;

pub static LOG: Mutex<Option<Arc<dyn Repository>>> = Mutex::new(None);
static STDERR_LEVEL: Mutex<LevelFilter> = Mutex::new(LevelFilter::Warn);

#[allow(clippy::missing_errors_doc)]
pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
pub enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

static LOGGER: Logger = Logger;

/// Messages of all levels down to debug are persisted, only messages up to `stderr_level` are
/// printed.
///
/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(
    repository: Arc<dyn Repository>,
    stderr_level: LevelFilter,
) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(repository);
    }
    if let Ok(mut level) = STDERR_LEVEL.lock() {
        *level = stderr_level;
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(stderr_level.max(LevelFilter::Debug)))
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("trainlog")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();

        if STDERR_LEVEL
            .lock()
            .is_ok_and(|level| record.level() <= *level)
        {
            eprintln!("{}: {message}", record.level().as_str().to_lowercase());
        }

        if let Ok(log) = LOG.lock() {
            if let Some(ref log) = *log {
                let _ = log.write_entry(Entry {
                    time: Local::now().format("%b %d %H:%M:%S").to_string(),
                    level: record.level(),
                    message,
                });
            }
        }
    }

    fn flush(&self) {}
}

/// Log entries kept as a JSON array in a file, most recent entry first.
pub struct LogFile {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read(&self) -> Result<VecDeque<Entry>, Error> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|err| Error::Unknown(err.to_string()))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(VecDeque::new()),
            Err(err) => Err(Error::Unknown(err.to_string())),
        }
    }
}

impl Repository for LogFile {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error> {
        let _guard = self
            .lock
            .lock()
            .map_err(|err| Error::Unknown(err.to_string()))?;
        self.read()
    }

    fn write_entry(&self, entry: Entry) -> Result<(), Error> {
        let _guard = self
            .lock
            .lock()
            .map_err(|err| Error::Unknown(err.to_string()))?;
        let mut entries = self.read().unwrap_or_default();
        entries.push_front(entry);
        entries.truncate(MAX_ENTRIES);
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| Error::Unknown(err.to_string()))?;
        }
        let content =
            serde_json::to_string(&entries).map_err(|err| Error::Unknown(err.to_string()))?;
        std::fs::write(&self.path, content).map_err(|err| Error::Unknown(err.to_string()))
    }
}
