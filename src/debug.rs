use parking_lot::Mutex;
/// Debug log sink for clr-trace
///
/// Controlled by the DEBUG_LEVEL environment variable, or overridden by the
/// config file / `--log-level`:
/// - 0 or unset: No debugging
/// - 1: Errors and warnings
/// - 2: Info level (snapshot loading, config)
/// - 3: Debug level (dispatch decisions, hidden frames)
/// - 4: Trace level (every alias decision)
///
/// Output goes to `clr_trace_debug.log` in the system temp directory so
/// rendered traces on stdout stay clean.
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    fn from_env() -> Self {
        std::env::var("DEBUG_LEVEL")
            .map(|val| Self::parse(&val))
            .unwrap_or(DebugLevel::Off)
    }

    /// Parse a `DEBUG_LEVEL` value; anything unrecognised is `Off`.
    pub fn parse(value: &str) -> Self {
        match value.trim().parse::<u8>() {
            Ok(1) => DebugLevel::Error,
            Ok(2) => DebugLevel::Info,
            Ok(3) => DebugLevel::Debug,
            Ok(4) => DebugLevel::Trace,
            _ => DebugLevel::Off,
        }
    }

    /// Warnings share the error level; the sink has no separate warn tier.
    pub fn from_level_filter(filter: log::LevelFilter) -> Self {
        match filter {
            log::LevelFilter::Off => DebugLevel::Off,
            log::LevelFilter::Error | log::LevelFilter::Warn => DebugLevel::Error,
            log::LevelFilter::Info => DebugLevel::Info,
            log::LevelFilter::Debug => DebugLevel::Debug,
            log::LevelFilter::Trace => DebugLevel::Trace,
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            DebugLevel::Off => log::LevelFilter::Off,
            DebugLevel::Error => log::LevelFilter::Warn,
            DebugLevel::Info => log::LevelFilter::Info,
            DebugLevel::Debug => log::LevelFilter::Debug,
            DebugLevel::Trace => log::LevelFilter::Trace,
        }
    }

    fn of_record(level: log::Level) -> Self {
        Self::from_level_filter(level.to_level_filter())
    }
}

/// Location of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("clr_trace_debug.log")
}

/// Global debug logger
struct DebugLogger {
    level: DebugLevel,
    file: Option<std::fs::File>,
}

impl DebugLogger {
    fn new(level: DebugLevel) -> Self {
        let mut logger = DebugLogger { level, file: None };
        logger.open();
        logger
    }

    fn open(&mut self) {
        if self.level == DebugLevel::Off || self.file.is_some() {
            return;
        }
        // Silently stay file-less if the log can't be opened
        if let Ok(f) = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
        {
            self.file = Some(f);
            self.write_raw(&format!(
                "\n{}\nclr-trace debug session started at {} (level={:?})\n{}\n",
                "=".repeat(80),
                get_timestamp(),
                self.level,
                "=".repeat(80)
            ));
        }
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn log(&mut self, level: DebugLevel, label: &str, category: &str, msg: &str) {
        if level != DebugLevel::Off && level <= self.level {
            self.write_raw(&format!(
                "[{}] [{}] [{}] {}\n",
                get_timestamp(),
                label,
                category,
                msg
            ));
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new(DebugLevel::from_env())))
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

fn label(level: DebugLevel) -> &'static str {
    match level {
        DebugLevel::Error => "ERROR",
        DebugLevel::Info => "INFO ",
        DebugLevel::Debug => "DEBUG",
        DebugLevel::Trace => "TRACE",
        DebugLevel::Off => "",
    }
}

/// Current sink level.
pub fn level() -> DebugLevel {
    get_logger().lock().level
}

/// Override the level chosen from `DEBUG_LEVEL`, opening the log file if
/// needed.
pub fn set_level(level: DebugLevel) {
    let mut logger = get_logger().lock();
    logger.level = level;
    logger.open();
    log::set_max_level(level.to_level_filter());
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    let logger = get_logger().lock();
    level <= logger.level
}

/// Log a message at specified level
pub fn log(level: DebugLevel, category: &str, msg: &str) {
    let mut logger = get_logger().lock();
    logger.log(level, label(level), category, msg);
}

/// Log formatted message
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if is_enabled(level) {
        log(level, category, &format!("{}", args));
    }
}

/// Forwards `log` records into the debug sink, using the record target as
/// the category.
struct LogBridge;

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        is_enabled(DebugLevel::of_record(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let level = DebugLevel::of_record(record.level());
        if !is_enabled(level) {
            return;
        }
        let tag = match record.level() {
            log::Level::Warn => "WARN ",
            _ => label(level),
        };
        get_logger()
            .lock()
            .log(level, tag, record.target(), &record.args().to_string());
    }

    fn flush(&self) {}
}

static BRIDGE: LogBridge = LogBridge;

/// Route `log` macros into the debug sink.
///
/// `level` (from `--log-level` or the config) takes precedence over
/// `DEBUG_LEVEL`. Calling this more than once only updates the level.
pub fn init_log_bridge(level: Option<log::LevelFilter>) {
    if let Some(filter) = level {
        set_level(DebugLevel::from_level_filter(filter));
    }
    let _ = log::set_logger(&BRIDGE);
    log::set_max_level(self::level().to_level_filter());
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Debug, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Trace, $category, format_args!($($arg)*))
    };
}
