//! Logic Force Pipeline Demo
//!
//! Walks text through matching, force encoding, analytics and decisions,
//! then calibrates the engine and prints the recorded metrics.
//!
//! Usage: `lft-demo [config.toml]`

use anyhow::Result;
use colored::*;
use tracing::info;

use lft_analytics::{LogicMeasurements, QuantumAnalytics};
use lft_decision::QuantumDecisionSystem;
use lft_observability::{MetricStats, MetricsRecorder};
use lft_types::{CalibrationSample, LftConfig, RuleSet, StateVector};

const INPUTS: &[&str] = &[
    "hello, how are you?",
    "hi there",
    "why does this happen and how do I fix it?",
    "please create a new report",
    "",
];

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = match std::env::args().nth(1) {
        Some(path) => LftConfig::load(&path)?,
        None => LftConfig::default(),
    };
    info!(
        num_qubits = config.num_qubits,
        backend = %config.quantum_backend,
        "configuration loaded"
    );

    banner("Logic Force Pipeline Demonstration");

    let rules = RuleSet::new()
        .with_category("greeting", ["hello", "hi", "good morning"])
        .with_category("query", ["how", "why", "what"])
        .with_category("command", ["creat*", "delete", "update"])
        .with_context("greeting", "social")
        .with_context("query", "support");
    let metrics = MetricsRecorder::from_config(&config.metrics)?;
    let system = QuantumDecisionSystem::new(rules, config)?;

    section("Scenario 1: Text to decision");
    for text in INPUTS {
        run(&system, &metrics, text)?;
    }

    section("Scenario 2: Calibration");
    let samples = vec![
        CalibrationSample::new("hello, how are you?", "query"),
        CalibrationSample::new("hi, what is new?", "query"),
    ];
    let report = system.calibrate(&samples)?;
    println!(
        "  applied {} of {} samples, mean error {:.3}",
        report.samples_applied, report.samples_seen, report.mean_error
    );
    for (category, weight) in system.weights().iter() {
        println!("  weight {:<10} {:.3}", category, weight);
    }
    run(&system, &metrics, INPUTS[0])?;

    section("Scenario 3: Impact of applying force");
    let (force, decision) = system.evaluate(INPUTS[2])?;
    let initial = StateVector::basis(system.num_qubits(), 0)?;
    let moved = system.processor().apply_force(&initial, &force)?;
    let impact = LogicMeasurements::impact_report(&initial, &moved)?;
    println!("{}", serde_json::to_string_pretty(&impact)?);
    println!("{}", serde_json::to_string_pretty(&decision.distribution)?);

    section("Scenario 4: Context direction");
    for context in ["social", "support", "billing"] {
        let (force, decision) = system.evaluate_in_context(INPUTS[0], context)?;
        println!(
            "  {:<8} direction {:.3} rad  uncertainty {:.3}  decision {}",
            context,
            force.direction,
            force.uncertainty,
            decision.decision.as_deref().unwrap_or("none")
        );
    }

    section("Metrics");
    for name in metrics.metric_names() {
        match metrics.get_metric_stats(&name) {
            MetricStats::Summary(s) => println!(
                "  {:<28} n={:<3} mean={:.3} min={:.3} max={:.3} sd={:.3}",
                name, s.count, s.mean, s.min, s.max, s.stddev
            ),
            MetricStats::NoData => println!("  {:<28} no data", name),
        }
    }

    println!();
    println!("{}", "Demo complete!".green().bold());
    Ok(())
}

fn run(system: &QuantumDecisionSystem, metrics: &MetricsRecorder, text: &str) -> Result<()> {
    let (force, decision) = system.evaluate(text)?;
    let entropy = QuantumAnalytics::calculate_entropy(&decision.quantum_state)?;
    let coherence = QuantumAnalytics::measure_coherence(&decision.quantum_state)?;
    metrics.record_force(&force)?;
    metrics.record_decision(&decision)?;
    metrics.record_metric("lft.entropy", entropy)?;
    metrics.record_metric("lft.coherence", coherence)?;

    let label = match &decision.decision {
        Some(label) => label.green().bold(),
        None => "none".dimmed(),
    };
    println!("  {:?}", text);
    println!(
        "    force {:.3}  decision {} (p = {:.3}, confidence {:.3})",
        force.force, label, decision.probability, decision.confidence
    );
    println!("    entropy {:.3} bits  coherence {:.3}", entropy, coherence);
    Ok(())
}

fn banner(title: &str) {
    let rule = "═".repeat(66);
    println!("{}", format!("╔{}╗", rule).cyan());
    println!("{}", format!("║ {:<64} ║", title).cyan());
    println!("{}", format!("╚{}╝", rule).cyan());
    println!();
}

fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(66).yellow());
    println!("{}", format!("  {}", title).yellow().bold());
    println!("{}", "━".repeat(66).yellow());
}
