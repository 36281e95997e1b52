//! Logging for fontpair
//!
//! Routes every `log` record to a session log file in the system temp
//! directory (`fontpair_debug.log`), keeping stdout free for CLI output.
//! When RUST_LOG is set, records are mirrored to stderr as well.
//!
//! Level precedence: `--log-level` flag, then RUST_LOG, then the config file.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use fontpair_config::LogLevel;
use log::LevelFilter;

const LOG_FILE_NAME: &str = "fontpair_debug.log";

struct LogBridge {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Path of the session log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

fn env_level() -> Option<LevelFilter> {
    let value = std::env::var("RUST_LOG").ok()?;
    // Accept plain levels and take the first directive's level from "target=level" lists
    let directive = value.split(',').next()?.trim();
    let level = directive.rsplit('=').next()?;
    LogLevel::parse(level).map(LogLevel::to_level_filter)
}

/// Install the logger. `cli_level` overrides RUST_LOG; without either,
/// logging stays off until [`apply_config_level`] is called.
pub fn init_log_bridge(cli_level: Option<LogLevel>) {
    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    let level = cli_level
        .map(LogLevel::to_level_filter)
        .or_else(env_level)
        .unwrap_or(LevelFilter::Off);

    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(log_path())
        .ok();

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        file: Mutex::new(file),
        mirror_stderr: rust_log_set,
    });
    if log::set_logger(bridge).is_ok() {
        log::set_max_level(level);
        log::info!(
            "fontpair {} log session started (level={})",
            crate::VERSION,
            level
        );
    }
}

/// Apply the config file's level when neither the flag nor RUST_LOG chose one.
pub fn apply_config_level(cli_level: Option<LogLevel>, config_level: LogLevel) {
    if cli_level.is_none() && env_level().is_none() {
        log::set_max_level(config_level.to_level_filter());
    }
}
