use std::fs;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Builds the subscriber: a JSON file layer under `log_dir` plus a console layer.
///
/// The file layer is skipped when `log_dir` cannot be created.
pub fn subscriber(log_dir: &Path) -> (impl Subscriber + Send + Sync + 'static, Option<WorkerGuard>) {
    let (file_layer, guard) = match fs::create_dir_all(log_dir) {
        Ok(()) => {
            let file_appender = tracing_appender::rolling::daily(log_dir, "unicorn_scraper.log");
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
            (
                Some(fmt::layer().json().with_writer(non_blocking_writer)),
                Some(guard),
            )
        }
        Err(e) => {
            eprintln!("Could not create log directory {}: {}", log_dir.display(), e);
            (None, None)
        }
    };

    let filter = EnvFilter::from_default_env().add_directive(
        "unicorn_scraper=info"
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into()),
    );

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(fmt::layer().with_writer(std::io::stderr));

    (subscriber, guard)
}

/// Initializes logging with a JSON file layer and a console layer.
///
/// The console layer writes to stderr so reports printed on stdout stay clean.
/// The returned guard must be held until exit for the file writer to flush.
pub fn init_logging(log_dir: &Path) -> Option<WorkerGuard> {
    let (subscriber, guard) = subscriber(log_dir);
    subscriber.init();
    guard
}
