#[path = "e2e/text_to_decision.rs"]
mod text_to_decision;

#[path = "e2e/calibration_loop.rs"]
mod calibration_loop;

#[path = "e2e/rule_updates.rs"]
mod rule_updates;

#[path = "e2e/state_analytics.rs"]
mod state_analytics;

#[path = "e2e/pipeline_metrics.rs"]
mod pipeline_metrics;
