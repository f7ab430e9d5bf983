//! End-to-end test: swapping the bound rule set while the engine is in use.

use std::sync::Arc;
use std::thread;

use lft_decision::QuantumDecisionSystem;
use lft_types::{LftConfig, LftError, RuleSet};

#[test]
fn updated_rules_take_effect_for_new_calls() {
    let system = QuantumDecisionSystem::with_rules(
        RuleSet::new().with_category("greeting", ["hello"]),
    )
    .unwrap();
    assert_eq!(system.process("goodbye").unwrap().decision, None);

    system
        .update_rules(
            RuleSet::new()
                .with_category("greeting", ["hello"])
                .with_category("farewell", ["goodbye", "bye"]),
        )
        .unwrap();
    assert_eq!(
        system.process("goodbye").unwrap().decision.as_deref(),
        Some("farewell")
    );
}

#[test]
fn snapshot_survives_a_swap() {
    let system = QuantumDecisionSystem::with_rules(
        RuleSet::new().with_category("greeting", ["hello"]),
    )
    .unwrap();
    let snapshot = system.rules();
    system
        .update_rules(RuleSet::new().with_category("query", ["why"]))
        .unwrap();
    assert!(snapshot.contains("greeting"));
    assert!(!system.rules().contains("greeting"));
}

#[test]
fn oversized_rule_set_is_rejected_and_old_rules_kept() {
    let system = QuantumDecisionSystem::new(
        RuleSet::new().with_category("a", ["x"]),
        LftConfig::default().with_num_qubits(2),
    )
    .unwrap();
    let too_many: RuleSet = ["a", "b", "c", "d"]
        .into_iter()
        .map(|c| (c, vec![c]))
        .collect();
    assert!(matches!(
        system.update_rules(too_many),
        Err(LftError::InvalidParameter(_))
    ));
    assert_eq!(system.rules().len(), 1);
}

#[test]
fn concurrent_reads_during_swaps_stay_consistent() {
    let system = Arc::new(
        QuantumDecisionSystem::with_rules(RuleSet::new().with_category("alpha", ["go"]))
            .unwrap(),
    );

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let system = Arc::clone(&system);
            thread::spawn(move || {
                for _ in 0..200 {
                    let result = system.process("go now").unwrap();
                    // whichever rule set was current, "go" maps to exactly one category
                    let label = result.decision.unwrap();
                    assert!(label == "alpha" || label == "beta");
                    assert!(result.quantum_state.is_normalized());
                }
            })
        })
        .collect();

    for i in 0..50 {
        let name = if i % 2 == 0 { "beta" } else { "alpha" };
        system
            .update_rules(RuleSet::new().with_category(name, ["go"]))
            .unwrap();
    }
    for reader in readers {
        reader.join().unwrap();
    }
}
