use std::io;
use std::sync::Once;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "tib_core=warn";

static INIT: Once = Once::new();

/// Install the stderr subscriber. Later calls are no-ops.
pub fn init_tracing(json: bool) {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let builder = tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_target(true)
            .with_env_filter(filter);

        if json {
            builder
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .init();
        } else {
            builder.without_time().init();
        }
    });
}
