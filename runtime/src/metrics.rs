//! Metric recording for the Store runtime.
//!
//! Metrics go through the `metrics` facade. Nothing is exported unless the
//! host process installs a recorder; without one every call is a no-op.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;

/// Register descriptions for every metric the store emits.
///
/// Call once after installing a recorder so exporters can show help text.
pub fn describe_metrics() {
    describe_counter!(
        "store_actions_total",
        "Total number of actions sent to a store by callers"
    );
    describe_counter!(
        "store_feedback_actions_total",
        "Total number of actions fed back into a store by effects"
    );
    describe_counter!(
        "store_rollbacks_total",
        "Total number of sends whose updates were discarded"
    );
    describe_histogram!(
        "store_reducer_duration_seconds",
        "Time taken by a single reducer call"
    );
    describe_histogram!(
        "store_effects_count",
        "Number of effects returned by a single reducer call"
    );
}

/// Store metrics recorder.
pub struct StoreMetrics;

impl StoreMetrics {
    /// Record an action sent by a caller.
    pub fn record_action() {
        counter!("store_actions_total").increment(1);
    }

    /// Record an action produced by an effect.
    pub fn record_feedback() {
        counter!("store_feedback_actions_total").increment(1);
    }

    /// Record one reducer call and the effects it returned.
    pub fn record_reduce(duration: Duration, effects: usize) {
        histogram!("store_reducer_duration_seconds").record(duration.as_secs_f64());
        // Note: Precision loss acceptable for metrics (effect counts < 2^52)
        #[allow(clippy::cast_precision_loss)]
        histogram!("store_effects_count").record(effects as f64);
    }

    /// Record a send whose staged state was thrown away.
    pub fn record_rollback() {
        counter!("store_rollbacks_total").increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_recorder_is_a_noop() {
        describe_metrics();
        StoreMetrics::record_action();
        StoreMetrics::record_feedback();
        StoreMetrics::record_reduce(Duration::from_micros(3), 2);
        StoreMetrics::record_rollback();
    }
}
