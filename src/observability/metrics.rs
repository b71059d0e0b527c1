//! # Function Metrics
//!
//! Prometheus metrics for invocations and the storage listing call.

use anyhow::Result;
use prometheus::{Encoder, Histogram, IntCounterVec, IntGauge, Registry, TextEncoder};
use std::sync::LazyLock;

/// Global Prometheus metrics registry
pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static REQUESTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "latest_artifact_requests_total",
            "Total number of latest-artifact invocations by outcome",
        ),
        &["outcome"],
    )
    .expect("Failed to create REQUESTS_TOTAL metric - this should never happen")
});

static LISTING_DURATION: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "latest_artifact_listing_duration_seconds",
            "Duration of the storage listing call in seconds",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
    )
    .expect("Failed to create LISTING_DURATION metric - this should never happen")
});

static LISTED_OBJECTS: LazyLock<IntGauge> = LazyLock::new(|| {
    IntGauge::new(
        "latest_artifact_listed_objects",
        "Number of objects returned by the most recent listing",
    )
    .expect("Failed to create LISTED_OBJECTS metric - this should never happen")
});

/// Register all metrics with the registry
///
/// Calling this more than once is harmless.
#[allow(
    clippy::missing_errors_doc,
    reason = "Error documentation is provided in doc comments"
)]
pub fn register_metrics() -> Result<()> {
    let collectors: [Box<dyn prometheus::core::Collector>; 3] = [
        Box::new(REQUESTS_TOTAL.clone()),
        Box::new(LISTING_DURATION.clone()),
        Box::new(LISTED_OBJECTS.clone()),
    ];
    for collector in collectors {
        match REGISTRY.register(collector) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Count one invocation; `outcome` is `found`, `not_found` or `error`
pub fn increment_requests(outcome: &str) {
    REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn observe_listing_duration(duration_secs: f64) {
    LISTING_DURATION.observe(duration_secs);
}

pub fn set_listed_objects(count: usize) {
    LISTED_OBJECTS.set(i64::try_from(count).unwrap_or(i64::MAX));
}

/// Encode the registry in the Prometheus text exposition format
#[allow(
    clippy::missing_errors_doc,
    reason = "Error documentation is provided in doc comments"
)]
pub fn render() -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
