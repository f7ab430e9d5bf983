//! Property tests: rule matching does not depend on how rules are listed.

use std::collections::{BTreeMap, HashMap};

use lft_decision::QuantumDecisionSystem;
use lft_force::RuleMatcher;
use lft_types::{LftConfig, RuleSet};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_rules() -> impl Strategy<Value = BTreeMap<String, Vec<String>>> {
    prop::collection::btree_map(
        "[a-e]{1,3}",
        prop::collection::vec("[a-f]{1,3}", 0..4),
        0..6,
    )
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-f]{1,3}", 0..12).prop_map(|words| words.join(" "))
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn scores_ignore_category_listing_order(rules in arb_rules(), text in arb_text()) {
        let forward: RuleSet = rules.clone().into_iter().collect();
        let reversed: RuleSet = rules.clone().into_iter().rev().collect();
        let hashed = RuleSet::from(rules.into_iter().collect::<HashMap<_, _>>());

        let expected = RuleMatcher::new().match_text(&text, &forward);
        prop_assert_eq!(&expected, &RuleMatcher::new().match_text(&text, &reversed));
        prop_assert_eq!(&expected, &RuleMatcher::new().match_text(&text, &hashed));
        prop_assert!(expected.values().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn decisions_are_valid_for_any_text(rules in arb_rules(), text in arb_text()) {
        let rules: RuleSet = rules.into_iter().collect();
        let system = QuantumDecisionSystem::new(rules.clone(), LftConfig::default()).unwrap();
        let (force, decision) = system.evaluate(&text).unwrap();

        prop_assert!((0.0..=1.0).contains(&force.force));
        prop_assert!((0.0..=1.0).contains(&force.confidence));
        prop_assert!((0.0..=1.0 + 1e-9).contains(&decision.probability));
        prop_assert!(decision.quantum_state.is_normalized());
        if let Some(label) = &decision.decision {
            prop_assert!(rules.contains(label));
            prop_assert!(decision.probability >= system.config().significance_floor);
        }
    }
}
