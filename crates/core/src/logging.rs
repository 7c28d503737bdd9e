use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter directives read before `RUST_LOG`.
pub const LOG_ENV: &str = "CHANSCOPE_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// `~/.chanscope/logs`, or `./.chanscope/logs` when there is no home directory.
pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".chanscope")
        .join("logs")
}

/// First non-blank of `CHANSCOPE_LOG` and `RUST_LOG`, else `info`.
fn filter_directives(chanscope: Option<String>, rust: Option<String>) -> String {
    [chanscope, rust]
        .into_iter()
        .flatten()
        .find(|directives| !directives.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string())
}

fn env_filter() -> EnvFilter {
    let directives = filter_directives(
        std::env::var(LOG_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber: a daily `<component>.<date>.log` under
/// [`log_dir`] plus, optionally, stderr.
///
/// Returns `None` when the log directory is unusable or a subscriber is
/// already installed. Keep the guard alive for as long as logs should be
/// flushed.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<WorkerGuard> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(component)
        .filename_suffix("log")
        .build(log_dir())
        .ok()?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);
    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .ok()?;

    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_is_under_dot_chanscope() {
        assert!(log_dir().ends_with(".chanscope/logs"));
    }

    #[test]
    fn test_filter_precedence() {
        let some = |s: &str| Some(s.to_string());

        assert_eq!(filter_directives(some("debug"), some("warn")), "debug");
        assert_eq!(filter_directives(some("  "), some("warn")), "warn");
        assert_eq!(filter_directives(None, some("chanscope_core=trace")), "chanscope_core=trace");
        assert_eq!(filter_directives(None, None), "info");
    }
}
