//! Logging setup on top of env_logger, aware of active progress bars.

use std::io::Write;

use indicatif::MultiProgress;

/// Logger that prints through a MultiProgress so log lines do not tear
/// through active bars.
struct BarAwareLogger {
    inner: env_logger::Logger,
    multi: MultiProgress,
}

impl log::Log for BarAwareLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if !self.inner.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{:<5}] {}", record.level(), record.args());
        self.multi.suspend(|| eprintln!("{line}"));
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Initialize logging.
///
/// `quiet` caps the default at warn, `debug` opens debug; `RUST_LOG`
/// overrides either. Pass `multi` when progress bars will be active.
/// Repeated calls are no-ops, so tests may call this freely.
pub fn init_logging(quiet: bool, debug: bool, multi: Option<&MultiProgress>) {
    let default_level = if debug {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let env = env_logger::Env::default().default_filter_or(default_level);

    match multi {
        Some(multi) => {
            let inner = env_logger::Builder::from_env(env).build();
            let max_level = inner.filter();
            let logger = BarAwareLogger {
                inner,
                multi: multi.clone(),
            };
            if log::set_boxed_logger(Box::new(logger)).is_ok() {
                log::set_max_level(max_level);
            }
        }
        None => {
            let _ = env_logger::Builder::from_env(env)
                .format(|buf, record| {
                    writeln!(buf, "[{:<5}] {}", record.level(), record.args())
                })
                .try_init();
        }
    }
}
