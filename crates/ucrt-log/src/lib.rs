//! A minimal, zero-dependency logging crate for the `ucrt` object runtime.
//!
//! This crate provides leveled logging with automatic module path detection,
//! optional colored output, target-prefix filtering and configuration from
//! the environment.
//!
//! # Example
//!
//! ```
//! use ucrt_log::{error, warn, info, debug, Level};
//!
//! // Set the minimum log level
//! ucrt_log::set_level(Level::Debug);
//!
//! let status = "running";
//! info!("Runtime is {}", status);
//! debug!("Registered types: {:?}", vec!["Int32", "String"]);
//! warn!("This is a warning");
//! error!("This is an error message");
//! ```
//!
//! # Environment
//!
//! [`init_from_env`] reads two variables:
//!
//! - `UCRT_LOG`: minimum level (`error`, `warn`, `info`, `debug`, `trace`)
//! - `UCRT_LOG_TARGET`: only log targets starting with this prefix

use std::fmt::Arguments;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{OnceLock, PoisonError, RwLock};

/// Environment variable holding the minimum log level.
pub const LEVEL_ENV: &str = "UCRT_LOG";

/// Environment variable holding the target prefix filter.
pub const TARGET_ENV: &str = "UCRT_LOG_TARGET";

/// Log levels representing the severity/priority of log messages.
///
/// `Levels` are ordered from most severe (Error) to least severe (Trace).
/// Lower numeric values indicate higher severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Error level - critical failures and errors
    Error = 0,
    /// Warning level - potentially harmful situations
    Warn = 1,
    /// Info level - informational messages
    Info = 2,
    /// Debug level - detailed diagnostic information
    Debug = 3,
    /// Trace level - most detailed tracing information
    Trace = 4,
}

impl Level {
    const fn color_code(&self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[32m",
            Level::Debug => "\x1b[36m",
            Level::Trace => "\x1b[35m",
        }
    }

    /// Returns the string representation of this log level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Error,
            1 => Level::Warn,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }

    /// Parses a string into a Level.
    ///
    /// # Example
    ///
    /// ```
    /// use ucrt_log::Level;
    ///
    /// assert_eq!(Level::from_str("error"), Ok(Level::Error));
    /// assert_eq!(Level::from_str("INFO"), Ok(Level::Info));
    /// assert!(Level::from_str("invalid").is_err());
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_uppercase().as_str() {
            "ERROR" => Ok(Level::Error),
            "WARN" => Ok(Level::Warn),
            "INFO" => Ok(Level::Info),
            "DEBUG" => Ok(Level::Debug),
            "TRACE" => Ok(Level::Trace),
            _ => Err(format!("Invalid log level: {s}")),
        }
    }
}

/// The global logger instance.
///
/// Level and color are atomics; the target filter sits behind a lock because
/// it is only written during configuration.
pub struct Logger {
    level: AtomicU8,
    color: AtomicBool,
    target: RwLock<String>,
}

impl Logger {
    const fn new(level: Level) -> Self {
        Logger {
            level: AtomicU8::new(level as u8),
            color: AtomicBool::new(true),
            target: RwLock::new(String::new()),
        }
    }

    /// Sets the minimum log level.
    ///
    /// Messages below this level will not be logged.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Returns the current minimum log level.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Checks if a message at the given level would be logged.
    pub fn enabled(&self, level: Level) -> bool {
        level as u8 <= self.level.load(Ordering::Relaxed)
    }

    /// Enables or disables ANSI colors.
    pub fn set_color(&self, color: bool) {
        self.color.store(color, Ordering::Relaxed);
    }

    /// Restricts output to targets starting with `prefix`.
    ///
    /// An empty prefix lets every target through.
    pub fn set_target_filter(&self, prefix: &str) {
        let mut target =
            self.target.write().unwrap_or_else(PoisonError::into_inner);
        target.clear();
        target.push_str(prefix);
    }

    /// Checks whether `target` passes the prefix filter.
    pub fn target_enabled(&self, target: &str) -> bool {
        let filter = self.target.read().unwrap_or_else(PoisonError::into_inner);
        filter.is_empty() || target.starts_with(filter.as_str())
    }

    fn write(&self, level: Level, target: &str, args: Arguments) {
        const RESET: &str = "\x1b[0m";

        let mut err = std::io::stderr().lock();
        let level_str = level.as_str();
        // Logging never fails the caller.
        let _ = if self.color.load(Ordering::Relaxed) {
            let color = level.color_code();
            writeln!(err, "{color}[{level_str}]{RESET} {target}: {args}")
        } else {
            writeln!(err, "[{level_str}] {target}: {args}")
        };
    }
}

/// Logger settings, usually read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum level to log.
    pub level: Level,
    /// Target prefix filter, empty for all targets.
    pub target: String,
    /// Whether to emit ANSI colors.
    pub color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: Level::Info,
            target: String::new(),
            color: true,
        }
    }
}

impl LogConfig {
    /// Reads [`LEVEL_ENV`] and [`TARGET_ENV`] from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error message if `UCRT_LOG` is set to an unknown level.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use ucrt_log::{Level, LogConfig};
    ///
    /// let config = LogConfig::from_lookup(|key| match key {
    ///     "UCRT_LOG" => Some("trace".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.level, Level::Trace);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error message if the level variable names an unknown level.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = LogConfig::default();
        if let Some(level) = lookup(LEVEL_ENV) {
            config.level = Level::from_str(&level)?;
        }
        if let Some(target) = lookup(TARGET_ENV) {
            config.target = target;
        }
        Ok(config)
    }

    /// Installs this config on the global logger.
    pub fn apply(&self) {
        let logger = get_logger();
        logger.set_level(self.level);
        logger.set_target_filter(&self.target);
        logger.set_color(self.color);
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns a reference to the global logger instance.
///
/// This initializes the logger on first call with `Level::Info` as the default level.
///
/// # Example
///
/// ```
/// use ucrt_log::get_logger;
///
/// let logger = get_logger();
/// logger.set_level(ucrt_log::Level::Debug);
/// ```
pub fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(Level::Info))
}

/// Sets the minimum log level for the global logger.
pub fn set_level(level: Level) {
    get_logger().set_level(level);
}

/// Sets the minimum log level from a string.
///
/// # Example
///
/// ```
/// use ucrt_log::set_level_from_str;
///
/// set_level_from_str("debug").unwrap();
/// ```
///
/// # Errors
///
/// Returns an error message for an unknown level name.
pub fn set_level_from_str(s: &str) -> Result<(), String> {
    let level = Level::from_str(s)?;
    set_level(level);
    Ok(())
}

/// Configures the global logger from `UCRT_LOG` / `UCRT_LOG_TARGET`.
///
/// On error the logger keeps its previous settings.
///
/// # Errors
///
/// Returns an error message if `UCRT_LOG` names an unknown level.
pub fn init_from_env() -> Result<(), String> {
    LogConfig::from_env()?.apply();
    Ok(())
}

#[doc(hidden)]
pub fn __log_with_target(level: Level, target: &str, args: Arguments) {
    let logger = get_logger();
    if !logger.enabled(level) || !logger.target_enabled(target) {
        return;
    }
    logger.write(level, target, args);
}

/// The primary logging macro.
///
/// Logs a message at the specified level. The macro automatically captures
/// the module path where it was called.
///
/// # Example
///
/// ```
/// use ucrt_log::{log, Level};
///
/// log!(level: Level::Info, "This is an info message: {}", 42);
/// ```
#[macro_export]
macro_rules! log {
    (level: $level:expr, $($arg:tt)*) => {
        {
            if $crate::get_logger().enabled($level) {
                $crate::__log_with_target(
                    $level,
                    module_path!(),
                    format_args!($($arg)*)
                );
            }
        }
    };
}

/// Logs a message at the Error level.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Error, $($arg)*)
    };
}

/// Logs a message at the Warn level.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Warn, $($arg)*)
    };
}

/// Logs a message at the Info level.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Info, $($arg)*)
    };
}

/// Logs a message at the Debug level.
///
/// # Example
///
/// ```
/// use ucrt_log::debug;
///
/// # ucrt_log::set_level(ucrt_log::Level::Debug);
/// debug!("Constructing {} with {} args", "Int64", 0);
/// ```
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Debug, $($arg)*)
    };
}

/// Logs a message at the Trace level.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Trace, $($arg)*)
    };
}
