//! Numeric core of the Universal Axiom.
//!
//! ```text
//! Intelligence_n = E_n · (1 + F_n) · X · Y · Z · (A · B · C)
//! ```
//!
//! - Foundation layer: impulses (A), elements (B), pressure (C)
//! - Growth layer: exponential growth `E_n = 2·base^n − 1` and Fibonacci regulation `F_n`
//! - Cognitive layer: objectivity (X = 1 − subjectivity), purpose (Y), time (Z)
//!
//! Every operation in this crate is total. Overflow and NaN in the growth layer
//! saturate to [`SAFE_MAX`]; mutator inputs that would leave a layer out of
//! range are clamped. Nothing here returns `Result`.
//!
//! [`AxiomEngine`] exclusively owns the three layers, so the step index has a
//! single home and cannot drift out of sync.

pub mod analysis;
mod engine;
mod guard;
mod layers;
mod simulator;

pub use engine::{
    AxiomEngine, AxiomSnapshot, CognitiveSnapshot, FoundationSnapshot, GrowthSnapshot,
};
pub use guard::{SAFE_MAX, saturate};
pub use layers::{
    CognitiveState, DEFAULT_GROWTH_BASE, FoundationState, GrowthState, MAX_STEP, MIN_STEP,
    PRESSURE_FLOOR, PURPOSE_FLOOR, clamp_step, fibonacci_sequence,
};
pub use simulator::{AxiomScenarioRunner, SUBJECTIVITY_RELIEF};
