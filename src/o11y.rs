//! Common observability utilities.

use tracing::Subscriber;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

/// The error type returned when building a subscriber.
#[derive(Debug, thiserror::Error)]
pub enum BuildSubscriberError {
    #[error("failed to parse filtering directive")]
    Parse(#[from] tracing_subscriber::filter::ParseError),
}

/// Build a tracing subscriber. Defaults to `info` unless `RUST_LOG`
/// says otherwise.
pub fn build_subscriber() -> Result<impl Subscriber, BuildSubscriberError> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    Ok(tracing_subscriber::registry().with(fmt_layer.with_filter(env_filter)))
}
