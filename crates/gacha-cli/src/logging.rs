use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use gacha_core::config::AppConfig;

const DEFAULT_FILTER: &str = "gacha=info,gacha_core=info,gacha_api=info";

/// Install the global subscriber: stderr always, plus a daily log file when enabled.
///
/// The returned guard must live until exit so buffered file output is flushed.
pub fn init(config: &AppConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let stderr = fmt::layer().with_writer(std::io::stderr);

    if config.logging.file {
        let appender = tracing_appender::rolling::daily(AppConfig::data_dir(), "gacha.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr)
            .with(fmt::layer().with_ansi(false).with_writer(writer))
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry().with(filter).with(stderr).init();
        None
    }
}
