//! Cross-crate scenario and property tests for the Logic Force pipeline.
//!
//! All tests live under `tests/`; this library is intentionally empty.
