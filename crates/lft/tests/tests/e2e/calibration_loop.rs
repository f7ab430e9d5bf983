//! End-to-end test: calibration shifts future decisions.

use lft_decision::QuantumDecisionSystem;
use lft_types::{CalibrationSample, LftConfig, RuleSet};

fn rules() -> RuleSet {
    RuleSet::new()
        .with_category("greeting", ["hello", "hi"])
        .with_category("query", ["how", "why"])
}

#[test]
fn calibration_flips_an_ambiguous_decision() {
    let system = QuantumDecisionSystem::with_rules(rules()).unwrap();
    assert_eq!(
        system.process("hello, how are you?").unwrap().decision.as_deref(),
        Some("greeting")
    );

    let samples = vec![
        CalibrationSample::new("hello, how are you?", "query"),
        CalibrationSample::new("hi, why is that?", "query"),
    ];
    let report = system.calibrate(&samples).unwrap();
    assert_eq!(report.samples_seen, 2);
    assert_eq!(report.samples_applied, 2);

    let after = system.process("hello, how are you?").unwrap();
    assert_eq!(after.decision.as_deref(), Some("query"));
    assert!(after.distribution["query"] > after.distribution["greeting"]);
}

#[test]
fn reset_restores_uniform_behavior() {
    let system = QuantumDecisionSystem::with_rules(rules()).unwrap();
    let baseline = system.process("hello, how are you?").unwrap();

    system
        .calibrate(&[CalibrationSample::new("hello how", "query")])
        .unwrap();
    assert_ne!(system.process("hello, how are you?").unwrap(), baseline);

    system.reset_weights();
    assert_eq!(system.process("hello, how are you?").unwrap(), baseline);
}

#[test]
fn weights_saturate_at_configured_bounds() {
    let mut config = LftConfig::default();
    config.calibration.learning_rate = 0.5;
    config.calibration.max_weight = 2.0;
    config.calibration.min_weight = 0.5;
    let system = QuantumDecisionSystem::new(rules(), config).unwrap();

    let samples = vec![CalibrationSample::new("hello how", "greeting")];
    for _ in 0..100 {
        system.calibrate(&samples).unwrap();
    }
    let weights = system.weights();
    assert!(weights.get("greeting") <= 2.0);
    assert!(weights.get("query") >= 0.5);
    assert!(weights.get("greeting") > weights.get("query"));
}

#[test]
fn explicit_weights_steer_decisions() {
    let system = QuantumDecisionSystem::with_rules(rules()).unwrap();
    system.set_weight("query", 3.0).unwrap();
    let result = system.process("hello, how are you?").unwrap();
    assert_eq!(result.decision.as_deref(), Some("query"));
    assert!((result.distribution["query"] / result.distribution["greeting"] - 3.0).abs() < 1e-9);
}
