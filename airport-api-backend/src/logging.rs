//! Logging setup, everything goes through a tracing fmt subscriber.
//!
//! actix's request logger writes through the `log` facade; `try_init` installs the bridge that
//! turns those records into tracing events.

use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    #[default]
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::INFO,
            Self::Verbose => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

/// Filter applied to every event. Directives in `RUST_LOG` are added on top of the
/// verbosity level.
fn log_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(verbosity.level_filter().into())
        .from_env_lossy()
}

/// Install the global subscriber. Only the first call in a process takes effect.
pub fn init_logging(verbosity: Verbosity) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbosity))
        .with_target(verbosity >= Verbosity::Verbose)
        .try_init();

    if let Err(err) = installed {
        tracing::debug!(error = %err, "Subscriber already installed");
    }
}
