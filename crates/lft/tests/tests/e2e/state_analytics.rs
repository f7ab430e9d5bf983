//! End-to-end test: analytics over encoder output.

use lft_analytics::{LogicMeasurements, QuantumAnalytics};
use lft_force::{LogicForceProcessor, QuantumStateEncoder};
use lft_types::{LftConfig, LftError, Observable, QuantumBackend, RuleSet, StateVector};

#[test]
fn unnormalized_vector_is_rejected_by_analytics() {
    let state = StateVector::from_real(&[0.9, 0.9]);
    assert!(matches!(
        QuantumAnalytics::calculate_entropy(&state),
        Err(LftError::InvalidState(_))
    ));
    assert!(matches!(
        QuantumAnalytics::measure_coherence(&state),
        Err(LftError::InvalidState(_))
    ));
}

#[test]
fn entropy_spans_null_to_spread_state() {
    let encoder = QuantumStateEncoder::default();
    let entropy = |force: f64| {
        QuantumAnalytics::calculate_entropy(&encoder.encode(force, 4).unwrap()).unwrap()
    };
    assert_eq!(entropy(0.0), 0.0);
    assert!(entropy(0.25) < entropy(0.5));
    assert!(entropy(0.5) <= 4.0);
    // full force: uniform over the 15 non-null states
    assert!((entropy(1.0) - 15f64.log2()).abs() < 1e-9);
}

#[test]
fn zero_force_has_no_coherence() {
    for backend in [QuantumBackend::Angle, QuantumBackend::Phase] {
        let state = QuantumStateEncoder::new(backend, true).encode(0.0, 4).unwrap();
        assert_eq!(QuantumAnalytics::measure_coherence(&state).unwrap(), 0.0);
        assert_eq!(QuantumAnalytics::calculate_entropy(&state).unwrap(), 0.0);
    }
}

#[test]
fn applying_force_changes_state_measurably() {
    let processor = LogicForceProcessor::new(LftConfig::default().with_num_qubits(3)).unwrap();
    let rules = RuleSet::new()
        .with_category("greeting", ["hello"])
        .with_category("query", ["why"]);
    let result = processor.process("hello why", &rules).unwrap();

    let initial = StateVector::basis(3, 0).unwrap();
    let moved = processor.apply_force(&initial, &result).unwrap();
    let report = LogicMeasurements::impact_report(&initial, &moved).unwrap();

    assert!(report.impact < 1.0);
    assert!(report.uncertainty < 1e-9);
    assert!(report.coherence_change > 0.0);
    assert!(report.final_entropy > 0.0);
}

#[test]
fn null_projector_expectation_matches_null_mass() {
    let state = QuantumStateEncoder::default().encode(0.5, 2).unwrap();
    let projector = Observable::diagonal(&[1.0, 0.0, 0.0, 0.0]).unwrap();
    let m = QuantumAnalytics::calculate_expectation(&state, &projector).unwrap();
    assert!((m.value - 0.5).abs() < 1e-9);
    assert!((m.uncertainty - 0.5).abs() < 1e-9);
}
