//! End-to-end test: free text through force, encoding and decision.
//!
//! Covers the documented scenarios: the ambiguous greeting/query tie, empty
//! input, and both encoding backends producing the same decision.

use lft_decision::QuantumDecisionSystem;
use lft_force::LogicForceProcessor;
use lft_types::{LftConfig, QuantumBackend, RuleSet};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn conversation_rules() -> RuleSet {
    RuleSet::new()
        .with_category("greeting", ["hello", "hi"])
        .with_category("query", ["how", "why"])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn ambiguous_text_ties_to_lexicographically_first_category() {
    let system = QuantumDecisionSystem::with_rules(conversation_rules()).unwrap();
    let (force, decision) = system.evaluate("hello, how are you?").unwrap();

    assert!((0.3..=0.7).contains(&force.force));
    assert_eq!(force.confidence, 0.0);
    assert!(!force.significant);

    assert_eq!(decision.decision.as_deref(), Some("greeting"));
    assert!((decision.probability - 0.25).abs() < 1e-9);
    assert!((decision.distribution["query"] - 0.25).abs() < 1e-9);
    // two equal masses carry no preference
    assert!(decision.confidence < 1e-9);
}

#[test]
fn empty_text_yields_no_force_and_no_decision() {
    let rules = RuleSet::new().with_category("greeting", ["hello"]);
    let system = QuantumDecisionSystem::with_rules(rules).unwrap();
    let (force, decision) = system.evaluate("").unwrap();

    assert_eq!(force.force, 0.0);
    assert_eq!(force.confidence, 0.0);
    assert_eq!(decision.decision, None);
    assert_eq!(decision.probability, 0.0);
    assert_eq!(decision.confidence, 0.0);
    assert!(decision.quantum_state.is_normalized());
}

#[test]
fn strong_single_category_match_is_significant() {
    let system = QuantumDecisionSystem::with_rules(conversation_rules()).unwrap();
    let (force, decision) = system.evaluate("why, how?").unwrap();

    // query fully matched, greeting not at all: mean score 0.5
    assert_eq!(force.force, 0.5);
    assert_eq!(force.confidence, 1.0);
    assert_eq!(decision.decision.as_deref(), Some("query"));
    assert!((decision.probability - 0.5).abs() < 1e-9);
    assert_eq!(decision.alternatives(), vec![("greeting", 0.0)]);
}

#[test]
fn backends_agree_on_decisions() {
    let angle = QuantumDecisionSystem::new(
        conversation_rules(),
        LftConfig::default().with_backend(QuantumBackend::Angle),
    )
    .unwrap();
    let phase = QuantumDecisionSystem::new(
        conversation_rules(),
        LftConfig::default().with_backend(QuantumBackend::Phase),
    )
    .unwrap();

    for text in ["hello", "why though", "hi, how and why", "nothing at all"] {
        let a = angle.process(text).unwrap();
        let p = phase.process(text).unwrap();
        assert_eq!(a.decision, p.decision, "text = {:?}", text);
        assert!((a.probability - p.probability).abs() < 1e-9);
    }
}

#[test]
fn processor_output_feeds_state_input() {
    let config = LftConfig::default().with_num_qubits(5);
    let processor = LogicForceProcessor::new(config.clone()).unwrap();
    let system = QuantumDecisionSystem::new(conversation_rules(), config).unwrap();

    let force = processor.process("hi there", &conversation_rules()).unwrap();
    assert_eq!(force.state_vector.len(), 32);

    let from_state = system.process(&force.state_vector).unwrap();
    let from_text = system.process("hi there").unwrap();
    assert_eq!(from_state.decision, from_text.decision);
    assert_eq!(from_state.probability, from_text.probability);
}

#[test]
fn repeated_runs_are_deterministic() {
    let system = QuantumDecisionSystem::with_rules(conversation_rules()).unwrap();
    let first = system.process("hello, why?").unwrap();
    for _ in 0..10 {
        assert_eq!(system.process("hello, why?").unwrap(), first);
    }
}

#[test]
fn context_directs_the_phase_but_not_the_decision() {
    use std::f64::consts::PI;

    let rules = conversation_rules()
        .with_context("greeting", "social")
        .with_context("query", "support");
    let config = LftConfig::default().with_backend(QuantumBackend::Phase);
    let system = QuantumDecisionSystem::new(rules, config).unwrap();

    let (social, social_decision) = system
        .evaluate_in_context("hello, how are you?", "social")
        .unwrap();
    assert!((social.direction - PI).abs() < 1e-12);
    assert!((social.uncertainty - 0.5).abs() < 1e-12);

    let (unrelated, _) = system
        .evaluate_in_context("hello, how are you?", "billing")
        .unwrap();
    assert_eq!(unrelated.direction, PI);

    let (plain, plain_decision) = system.evaluate("hello, how are you?").unwrap();
    assert_eq!(plain.direction, 0.0);
    assert_ne!(plain.state_vector, social.state_vector);
    assert_eq!(plain_decision.decision, social_decision.decision);
    assert!((plain_decision.probability - social_decision.probability).abs() < 1e-9);
}
