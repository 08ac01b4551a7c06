use std::sync::LazyLock;

use lgr_core::{LGR_CONFIG, set_color_override};
use log::{LevelFilter, SetLoggerError};

use crate::registry::Registry;

/// Process-wide registry, built from the `LGR_*` environment variables the
/// first time it is used and alive until the process exits.
static GLOBAL_REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    set_color_override(LGR_CONFIG.color());
    Registry::from_env()
});

/// The process-wide registry used by the logging macros.
pub fn global() -> &'static Registry {
    &GLOBAL_REGISTRY
}

/// Routes the `log` crate macros (`log::info!`, ...) through the process-wide
/// registry. Filtering is left to the registry thresholds.
pub fn init_log_facade() -> Result<(), SetLoggerError> {
    log::set_logger(global())?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
