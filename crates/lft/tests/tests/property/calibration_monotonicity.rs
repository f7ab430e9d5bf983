//! Property tests: consistent calibration never lowers the labeled weight.

use lft_decision::Calibrator;
use lft_types::{CalibrationConfig, CalibrationSample, RuleSet, Weights};
use proptest::prelude::*;

fn rules() -> RuleSet {
    RuleSet::new()
        .with_category("greeting", ["hello", "hi"])
        .with_category("query", ["how", "why"])
        .with_category("command", ["run", "stop"])
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("hello"),
            Just("hi"),
            Just("how"),
            Just("why"),
            Just("run"),
            Just("stop"),
            Just("and"),
        ],
        1..8,
    )
    .prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn labeled_weight_is_monotone_and_saturates(
        text in arb_text(),
        label in prop_oneof![Just("greeting"), Just("query"), Just("command")],
        learning_rate in 0.01f64..=1.0,
        rounds in 1usize..60,
    ) {
        let config = CalibrationConfig {
            learning_rate,
            ..CalibrationConfig::default()
        };
        let max_weight = config.max_weight;
        let min_weight = config.min_weight;
        let calibrator = Calibrator::new(config);
        let rules = rules();
        let samples = vec![CalibrationSample::new(text, label)];
        let mut weights = Weights::uniform();

        let mut previous = weights.get(label);
        for _ in 0..rounds {
            calibrator.calibrate(&samples, &rules, &mut weights).unwrap();
            let current = weights.get(label);
            prop_assert!(current >= previous);
            prop_assert!(current <= max_weight);
            previous = current;
        }
        for category in rules.categories() {
            prop_assert!(weights.get(category) >= min_weight);
        }
    }
}
