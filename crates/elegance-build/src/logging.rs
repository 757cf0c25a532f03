//! Logging initialisation.

use elegance_conf::LoggingSettings;
use tracing_subscriber::EnvFilter;

/// Installs a global `fmt` subscriber filtered by `settings.level`.
///
/// Returns `false` if a global subscriber was already installed, in which
/// case nothing changes. An invalid filter directive falls back to `info`.
pub fn init_logging(settings: &LoggingSettings) -> bool {
	let filter = EnvFilter::try_new(&settings.level).unwrap_or_else(|e| {
		eprintln!("invalid log level '{}': {e}; using 'info'", settings.level);
		EnvFilter::new("info")
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init()
		.is_ok()
}
