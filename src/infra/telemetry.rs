use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

pub(crate) const METRIC_LOAD_HIT: &str = "glifo_collection_load_hit_total";
pub(crate) const METRIC_LOAD_MISS: &str = "glifo_collection_load_miss_total";
pub(crate) const METRIC_LOAD_COALESCED: &str = "glifo_collection_load_coalesced_total";
pub(crate) const METRIC_LOAD_FAIL: &str = "glifo_collection_load_fail_total";
pub(crate) const METRIC_FALLBACK: &str = "glifo_icon_fallback_total";
pub(crate) const METRIC_MALFORMED: &str = "glifo_identifier_malformed_total";
pub(crate) const METRIC_BATCH_RENDER_MS: &str = "glifo_batch_render_ms";
pub(crate) const METRIC_WARM_MS: &str = "glifo_cache_warm_ms";

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            METRIC_LOAD_HIT,
            Unit::Count,
            "Total number of collection requests served from the cache."
        );
        describe_counter!(
            METRIC_LOAD_MISS,
            Unit::Count,
            "Total number of collection loads started."
        );
        describe_counter!(
            METRIC_LOAD_COALESCED,
            Unit::Count,
            "Total number of collection requests attached to an in-flight load."
        );
        describe_counter!(
            METRIC_LOAD_FAIL,
            Unit::Count,
            "Total number of collection loads that failed or found no data."
        );
        describe_counter!(
            METRIC_FALLBACK,
            Unit::Count,
            "Total number of identifiers substituted with the fallback icon."
        );
        describe_counter!(
            METRIC_MALFORMED,
            Unit::Count,
            "Total number of malformed icon identifiers rejected."
        );
        describe_histogram!(
            METRIC_BATCH_RENDER_MS,
            Unit::Milliseconds,
            "Batch render latency in milliseconds."
        );
        describe_histogram!(
            METRIC_WARM_MS,
            Unit::Milliseconds,
            "Cache warm phase latency in milliseconds."
        );
    });
}
