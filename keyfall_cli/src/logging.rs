use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default
/// filter; `verbose` raises the keyfall crates to debug.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "keyfall_core=debug,keyfall_loader=debug,keyfall=debug,warn"
    } else {
        "keyfall_core=info,keyfall_loader=info,keyfall=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}
