//! End-to-end test: feeding pipeline results into the metrics recorder.

use std::sync::Arc;

use lft_decision::QuantumDecisionSystem;
use lft_observability::{MetricStats, MetricsRecorder};
use lft_types::{MetricsConfig, RuleSet};

fn system() -> QuantumDecisionSystem {
    QuantumDecisionSystem::with_rules(
        RuleSet::new()
            .with_category("greeting", ["hello", "hi"])
            .with_category("query", ["how", "why"]),
    )
    .unwrap()
}

#[test]
fn recorder_summarizes_a_batch_of_runs() {
    let system = system();
    let recorder = MetricsRecorder::new();
    let inputs = ["hello", "why how", "", "hi, how are you?"];

    for text in inputs {
        let (force, decision) = system.evaluate(text).unwrap();
        recorder.record_force(&force).unwrap();
        recorder.record_decision(&decision).unwrap();
    }

    let force = recorder.get_metric_stats("lft.force");
    let summary = force.summary().unwrap();
    assert_eq!(summary.count, 4);
    assert_eq!(summary.min, 0.0);
    assert!(summary.max <= 1.0);

    // the empty input is the only suppressed decision
    let made = recorder.get_metric_stats("lft.decision.made");
    assert!((made.summary().unwrap().mean - 0.75).abs() < 1e-12);
}

#[test]
fn recorder_shared_across_threads_and_reset() {
    let system = Arc::new(system());
    let recorder = Arc::new(
        MetricsRecorder::from_config(&MetricsConfig {
            max_points_per_series: Some(16),
        })
        .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let system = Arc::clone(&system);
            let recorder = Arc::clone(&recorder);
            std::thread::spawn(move || {
                for _ in 0..10 {
                    let decision = system.process("hello").unwrap();
                    recorder.record_decision(&decision).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let stats = recorder.get_metric_stats("lft.decision.probability");
    assert_eq!(stats.summary().unwrap().count, 16);

    recorder.reset();
    assert_eq!(
        recorder.get_metric_stats("lft.decision.probability"),
        MetricStats::NoData
    );
}
