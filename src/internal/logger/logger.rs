// src/internal/logger/logger.rs

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::internal::config::LoggingConfig;

/// Initialize the global logger with the given configuration.
///
/// `RUST_LOG` takes precedence over the configured level. Console output goes
/// to stderr so it never interleaves with table output on stdout.
pub fn init_logger(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    if cfg.format == "json" {
        eprintln!("Warning: JSON log format is not enabled in this build. Using compact format.");
    }

    let console_layer = (!cfg.disable_console).then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(cfg.color)
            .with_level(true)
            .with_target(true)
            .compact()
    });

    let file_layer = match &cfg.output_path {
        Some(output_path) => {
            let log_file = create_log_file(output_path, cfg.append_to_file)?;
            Some(
                fmt::layer()
                    .with_writer(SharedFileWriter::new(log_file))
                    .with_ansi(false)
                    .with_level(true)
                    .with_target(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

/// Create or open log file based on configuration
fn create_log_file(path: &str, append: bool) -> anyhow::Result<fs::File> {
    let path = Path::new(path);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(append)
        .write(true)
        .truncate(!append)
        .open(path)?;

    Ok(file)
}

/// File writer shared between the subscriber's per-event writers.
#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<fs::File>>,
}

impl SharedFileWriter {
    fn new(file: fs::File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, fs::File>> {
        self.file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))
    }
}

impl io::Write for SharedFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.flush()
    }
}

impl<'a> fmt::MakeWriter<'a> for SharedFileWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
