#[path = "property/state_invariants.rs"]
mod state_invariants;

#[path = "property/matcher_properties.rs"]
mod matcher_properties;

#[path = "property/calibration_monotonicity.rs"]
mod calibration_monotonicity;
