//! Logging setup for the quote builder.
//!
//! Records go to stderr (coloured on a terminal) and, once
//! [`enable_file_logging`] has been called, to an append-mode log file. The
//! level comes from `RUST_LOG`, then from the config, and can be changed at
//! runtime with [`set_log_level`].

use anyhow::Result;
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

use crate::config::LoggingConfig;

// --- Formatter ---

/// `<local timestamp> <LEVEL> <file:line> <fields>`
struct LocalFmt;

fn level_colour(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
        let location = meta
            .file()
            .zip(meta.line())
            .map(|(file, line)| format!("{}:{line}", file.rsplit(['/', '\\']).next().unwrap_or(file)));

        if ansi {
            write!(
                writer,
                "\x1b[2m{timestamp}\x1b[0m {}{:>5}\x1b[0m ",
                level_colour(*meta.level()),
                meta.level()
            )?;
            if let Some(location) = &location {
                write!(writer, "\x1b[36m{location}\x1b[0m ")?;
            }
        } else {
            write!(writer, "{timestamp} {:>5} ", meta.level())?;
            if let Some(location) = &location {
                write!(writer, "{location} ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Late-bound file writer ---

type SharedFile = Arc<Mutex<Option<File>>>;

/// Writes to the log file once one is set; discards records until then.
#[derive(Clone)]
struct FileSlot(SharedFile);

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

// --- Statics ---

type SetLevelFn = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;

static SET_LOG_LEVEL: OnceLock<SetLevelFn> = OnceLock::new();
static FILE_SLOT: OnceLock<SharedFile> = OnceLock::new();

fn make_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

// --- Public API ---

/// Changes the active log filter. Accepts a bare level or any EnvFilter
/// directive (`"quote_core=debug,info"`).
pub fn set_log_level(level: &str) -> Result<()> {
    match SET_LOG_LEVEL.get() {
        Some(f) => f(level),
        None => anyhow::bail!("logging not yet initialized"),
    }
}

/// Starts appending log records to `path`, replacing any open log file.
/// The directory must already exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow::anyhow!("cannot open log file '{}': {e}", path.display()))?;

    match FILE_SLOT.get() {
        Some(slot) => {
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
            Ok(())
        }
        None => anyhow::bail!("logging not yet initialized"),
    }
}

/// Installs the global subscriber. Call once at startup; later calls are
/// ignored. A configured log file is opened right away.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_inner: SharedFile = Arc::new(Mutex::new(None));
    let _ = FILE_SLOT.set(file_inner.clone());

    let (level_filter, level_handle) = reload::Layer::new(make_filter(&config.level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(false)
        .with_writer(FileSlot(file_inner));

    if tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        let _ = SET_LOG_LEVEL.set(Box::new(move |level: &str| {
            let filter = EnvFilter::try_new(level)
                .map_err(|e| anyhow::anyhow!("invalid log level '{level}': {e}"))?;
            level_handle
                .reload(filter)
                .map_err(|e| anyhow::anyhow!("filter reload failed: {e}"))
        }));
    }

    if let Some(path) = &config.file {
        enable_file_logging(path)?;
    }
    Ok(())
}
