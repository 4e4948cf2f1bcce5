use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// Environment variable that raises the log level to `Trace`.
const TRACE_VAR: &str = "DEMO_TRACE";

struct Logger;

static LOGGER: Logger = Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!(
                "[{}:{}] {:<5} {}",
                record.file().unwrap_or("?"),
                record.line().unwrap_or(0),
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

pub fn init() -> Result<(), SetLoggerError> {
    let level = if std::env::var_os(TRACE_VAR).is_some() {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };

    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
