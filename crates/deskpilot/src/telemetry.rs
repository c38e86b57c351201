use std::fs;
use std::fs::OpenOptions;
use std::io;
use std::io::IsTerminal;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Keeps the non-blocking log writer alive; drop it last.
#[derive(Debug)]
pub struct TelemetryGuard {
    _guard: Option<WorkerGuard>,
}

/// Where log lines end up.
enum LogSink {
    Stderr,
    File(BoxMakeWriter, WorkerGuard),
}

impl LogSink {
    /// Opens `path` for appending, creating missing parent directories.
    fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        Ok(LogSink::File(BoxMakeWriter::new(non_blocking), guard))
    }

    /// Falls back to stderr when the log file cannot be opened. Tracing is
    /// not up yet, so the warning goes straight to stderr.
    fn resolve(log_file: Option<&Path>) -> Self {
        let Some(path) = log_file else {
            return LogSink::Stderr;
        };
        LogSink::open(path).unwrap_or_else(|err| {
            eprintln!("Warning: logging to stderr, cannot open {}: {}", path.display(), err);
            LogSink::Stderr
        })
    }

    fn is_file(&self) -> bool {
        matches!(self, LogSink::File(..))
    }

    fn into_parts(self) -> (BoxMakeWriter, Option<WorkerGuard>) {
        match self {
            LogSink::Stderr => (BoxMakeWriter::new(io::stderr), None),
            LogSink::File(writer, guard) => (writer, Some(guard)),
        }
    }
}

/// Logs to `log_file` when given, otherwise to stderr. `RUST_LOG` overrides
/// `default_level`. A second call leaves the first subscriber in place.
pub fn init_tracing(default_level: &str, log_file: Option<&Path>) -> TelemetryGuard {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let sink = LogSink::resolve(log_file);
    let ansi = !sink.is_file() && io::stderr().is_terminal();
    let (writer, guard) = sink.into_parts();

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer)
        .try_init()
        .is_ok();

    TelemetryGuard {
        _guard: if installed { guard } else { None },
    }
}
