use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Filter used when `RUST_LOG` is not set
fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "debug,eframe::native=warn,egui::context=warn,walkers=info,hyper_util=info,reqwest::connect=info"
    } else {
        "info,eframe=warn,egui::context=warn"
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter()));
    let fmt_layer = fmt::layer().with_filter(filter);

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Logging was already initialized");
        return;
    }

    #[cfg(feature = "profiling")]
    tracing::info!("Logging initialized (profiling scopes routed to tracing)");
    #[cfg(not(feature = "profiling"))]
    tracing::info!("Logging initialized (profiling disabled in this build)");
}
