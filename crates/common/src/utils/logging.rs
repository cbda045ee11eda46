use std::io;
use configs::LogFormat;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,sqlx=warn`
pub fn init_logging_default() {
    init_logging(LogFormat::Compact)
}

/// Initialize tracing subscriber with JSON structured output.
/// - Respects `RUST_LOG` if set, defaults to `info` with service-level debug
pub fn init_logging_json() {
    init_logging(LogFormat::Json)
}

fn default_filter(format: LogFormat) -> &'static str {
    match format {
        LogFormat::Compact => "info,sqlx=warn",
        // Service lookups log at debug; override with e.g. RUST_LOG=info,service=trace
        LogFormat::Json => "info,service=debug,sqlx=warn",
    }
}

/// Initialize logging in the format selected by `logging.format`.
/// Later calls are no-ops once a global subscriber is set.
pub fn init_logging(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(format)));
    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stdout);
    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
