use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn env_filter(verbose: bool) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "library_catalog={},library={}",
            default_level, default_level
        ))
    })
}

fn file_layer<S>(log_path: PathBuf) -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file_appender = tracing_appender::rolling::daily(
        log_path
            .parent()
            .unwrap_or_else(|| std::path::Path::new(".")),
        log_path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("library.log")),
    );

    fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .json()
}

/// Initialize logging for the server and CLI commands.
///
/// # Arguments
/// * `verbose` - Enable verbose (DEBUG) logging
/// * `log_file` - Optional path to a daily-rolling JSON log file, in addition to stderr
pub fn init(verbose: bool, log_file: Option<PathBuf>) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(stderr_layer);

    match log_file {
        Some(log_path) => {
            let _ = subscriber.with(file_layer(log_path)).try_init();
        }
        None => {
            let _ = subscriber.try_init();
        }
    }
}

/// Initialize logging for the terminal client.
///
/// Nothing is written to stderr while the client owns the screen, so
/// events only go to `log_file` when one is given.
pub fn init_for_tui(verbose: bool, log_file: Option<PathBuf>) {
    if let Some(log_path) = log_file {
        let _ = tracing_subscriber::registry()
            .with(env_filter(verbose))
            .with(file_layer(log_path))
            .try_init();
    }
}
