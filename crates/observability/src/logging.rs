//! Tracing subscriber initialization.

use eyre::Result;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::LogArgs;

/// Build the log filter for `args`.
///
/// Precedence:
/// 1. `--quiet` shows errors only and ignores everything else
/// 2. `RUST_LOG` if set, otherwise the level implied by `-v` flags
/// 3. Directives from `--log.filter` are added on top
///
/// Unparseable directives in `--log.filter` are skipped.
pub fn build_filter(args: &LogArgs, env: Option<&str>) -> EnvFilter {
    if args.quiet {
        return EnvFilter::new("error");
    }

    let mut filter = env
        .and_then(|env| EnvFilter::try_new(env).ok())
        .unwrap_or_else(|| EnvFilter::new(args.level()));

    if let Some(custom) = &args.filter {
        for directive in custom.split(',').filter(|d| !d.trim().is_empty()) {
            if let Ok(d) = directive.trim().parse() {
                filter = filter.add_directive(d);
            }
        }
    }

    filter
}

/// Install the global tracing subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(args: &LogArgs) -> Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(args, env.as_deref());

    let layer = fmt::Layer::new()
        .with_writer(std::io::stderr)
        .with_target(true);
    let layer = if args.json {
        layer.json().boxed()
    } else {
        layer.without_time().boxed()
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()?;

    Ok(())
}
