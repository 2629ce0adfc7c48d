//! Numeric samples pulled out of typed payloads, and a NaN-free mean.

use vitals_core::models::{BuildPhase, Event, EventPayload};

/// Arithmetic mean, or `None` for an empty sample. Callers must treat `None`
/// as "condition not met" rather than comparing against a NaN.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Build duration of a completed build.
pub fn build_duration_ms(event: &Event) -> Option<f64> {
    match &event.payload {
        EventPayload::Build(b) if b.phase != BuildPhase::Start => b.duration_ms,
        _ => None,
    }
}

pub fn bundle_size_bytes(event: &Event) -> Option<u64> {
    match &event.payload {
        EventPayload::Build(b) => b.bundle_size_bytes,
        _ => None,
    }
}

pub fn response_time_ms(event: &Event) -> Option<f64> {
    match &event.payload {
        EventPayload::Network(n) => Some(n.response_time_ms),
        _ => None,
    }
}

pub fn memory_usage_mb(event: &Event) -> Option<f64> {
    match &event.payload {
        EventPayload::Performance(p) => p.memory_usage_mb,
        _ => None,
    }
}
