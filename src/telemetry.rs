use std::collections::BTreeMap;

use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::BunyanFormattingLayer;
use tracing_bunyan_formatter::JsonStorageLayer;
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

/// 'subscriber' is a `tracing` trait, and is not to be confused with a
/// subscriber on the waitlist!
/// Note: `sink` must be a closure (e.g. `std::io::stderr`), not a return value.
pub fn get_subscriber<Sink>(
    name: &str,
    filter_level: &str,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    // sink must implement `MakeWriter` for all choices of the lifetime `'a`
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    // `RUST_LOG` wins over `filter_level`
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_level));
    let fmt_layer = BunyanFormattingLayer::new(name.to_string(), sink);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(fmt_layer)
}

/// Start the logger and subscriber. Must be called at most once per process,
/// before anything else logs.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> Result<(), anyhow::Error> {
    // `reqwest` (and `hyper` below it) emit `log` records, not `tracing` events
    LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}

/// Analytics stand-in. Nothing is sent anywhere; the event only shows up in the
/// logs.
pub fn track_event(
    name: &str,
    properties: &BTreeMap<&str, String>,
) {
    tracing::info!(event = name, properties = ?properties, "Event tracked");
}
