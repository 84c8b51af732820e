use anyhow::{Context, Result};
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

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LEVEL: &str = "info";

// --- Formatter ---

/// `<local time> <LEVEL> <file:line> <fields>`, coloured on a terminal.
struct LocalFmt;

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

        if ansi {
            write!(writer, "\x1b[2m{timestamp}\x1b[0m ")?;
        } else {
            write!(writer, "{timestamp} ")?;
        }

        let colour = match *meta.level() {
            Level::ERROR => "\x1b[1;31m",
            Level::WARN => "\x1b[1;33m",
            Level::INFO => "\x1b[1;32m",
            Level::DEBUG => "\x1b[1;34m",
            Level::TRACE => "\x1b[1;35m",
        };
        if ansi {
            write!(writer, "{colour}{:>5}\x1b[0m ", meta.level())?;
        } else {
            write!(writer, "{:>5} ", meta.level())?;
        }

        let file = meta
            .file()
            .map(|f| f.strip_prefix("src/").or_else(|| f.strip_prefix("src\\")).unwrap_or(f));
        if let (Some(file), Some(line)) = (file, meta.line()) {
            if ansi {
                write!(writer, "\x1b[36m{file}:{line}\x1b[0m ")?;
            } else {
                write!(writer, "{file}:{line} ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Late-bound log file ---

type FileHandle = Arc<Mutex<Option<File>>>;

/// Writer that discards output until a file is attached.
#[derive(Clone)]
struct FileSlot(FileHandle);

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

// --- Handles ---

type SetLevelFn = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;

static SET_LOG_LEVEL: OnceLock<SetLevelFn> = OnceLock::new();
static LOG_FILE: OnceLock<FileHandle> = OnceLock::new();

fn store_level_handle<S>(handle: reload::Handle<EnvFilter, S>)
where
    S: Subscriber + Send + Sync + 'static,
{
    let _ = SET_LOG_LEVEL.set(Box::new(move |level: &str| {
        let filter = EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level '{level}'"))?;
        handle.reload(filter).context("log filter reload failed")
    }));
}

// --- Public API ---

/// Installs the global subscriber: stderr output (coloured on a terminal)
/// plus a file layer that stays silent until [`enable_file_logging`].
///
/// The level comes from `RUST_LOG`, else `default_level`. Calling this more
/// than once has no effect.
pub fn init_logging(default_level: &str) {
    let file: FileHandle = Arc::new(Mutex::new(None));

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));
    let (level_filter, level_handle) = reload::Layer::new(filter);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(false)
        .with_writer(FileSlot(file.clone()));

    if tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        store_level_handle(level_handle);
        let _ = LOG_FILE.set(file);
    }
}

/// Changes the active filter. Accepts a bare level (`"debug"`) or any
/// `EnvFilter` directive (`"info,tax_ui=trace"`).
pub fn set_log_level(level: &str) -> Result<()> {
    match SET_LOG_LEVEL.get() {
        Some(set) => set(level),
        None => anyhow::bail!("logging not yet initialized"),
    }
}

/// Appends log output to `path`, replacing any file already attached. The
/// directory must exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;

    match LOG_FILE.get() {
        Some(slot) => {
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
            Ok(())
        }
        None => anyhow::bail!("logging not yet initialized"),
    }
}

pub fn disable_file_logging() {
    if let Some(slot) = LOG_FILE.get() {
        *slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
