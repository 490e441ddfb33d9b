// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade; without an installed recorder every call is a
//! no-op.

use metrics::describe_counter;

/// Register all Pantry metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        "pantry_inbound_events_total",
        "Inbound events by modality or callback"
    );
    describe_counter!("pantry_intents_total", "Classified text intents");
    describe_counter!(
        "pantry_duplicate_sessions_total",
        "Duplicate-resolution sessions by outcome"
    );
}

/// Record an inbound event (`text`, `voice`, `photo`, `document`, `callback`).
pub fn record_inbound(kind: &'static str) {
    metrics::counter!("pantry_inbound_events_total", "kind" => kind).increment(1);
}

pub fn record_intent(intent: &'static str) {
    metrics::counter!("pantry_intents_total", "intent" => intent).increment(1);
}

/// Record a duplicate session transition (`opened`, `complete`, `cancelled`).
pub fn record_duplicate_session(outcome: &str) {
    metrics::counter!("pantry_duplicate_sessions_total", "outcome" => outcome.to_string())
        .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_recorder_is_noop() {
        register_metrics();
        record_inbound("text");
        record_intent("chatter");
        record_duplicate_session("opened");
    }
}
