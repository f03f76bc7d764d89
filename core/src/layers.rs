//! The three parameter layers owned by [`crate::AxiomEngine`].

use serde::{Deserialize, Serialize};

use crate::guard::{SAFE_MAX, saturate};

/// Lowest step index the growth layer accepts.
pub const MIN_STEP: u32 = 1;
/// Highest step index the growth layer accepts. Beyond this, `E_n` leaves the
/// range where the formula stays meaningful in `f64`.
pub const MAX_STEP: u32 = 100;
/// Base of the exponential growth term.
pub const DEFAULT_GROWTH_BASE: f64 = 3.0;
/// Pressure never drops below this floor.
pub const PRESSURE_FLOOR: f64 = 0.01;
/// Purpose never drops below this floor once scaled.
pub const PURPOSE_FLOOR: f64 = 0.01;

/// Clamp an arbitrary step index into `[MIN_STEP, MAX_STEP]`.
#[must_use]
pub fn clamp_step(n: i64) -> u32 {
    n.clamp(i64::from(MIN_STEP), i64::from(MAX_STEP)) as u32
}

// ============================================================================
// Foundation layer: A · B · C
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoundationState {
    impulses: f64,
    elements: f64,
    pressure: f64,
}

impl FoundationState {
    /// Inputs are unconstrained; the pressure floor only applies to deltas.
    #[must_use]
    pub const fn new(impulses: f64, elements: f64, pressure: f64) -> Self {
        Self {
            impulses,
            elements,
            pressure,
        }
    }

    #[must_use]
    pub const fn impulses(&self) -> f64 {
        self.impulses
    }

    #[must_use]
    pub const fn elements(&self) -> f64 {
        self.elements
    }

    #[must_use]
    pub const fn pressure(&self) -> f64 {
        self.pressure
    }

    #[must_use]
    pub fn product(&self) -> f64 {
        self.impulses * self.elements * self.pressure
    }

    /// `f64::max` discards NaN, so a NaN delta lands on the floor.
    pub(crate) fn apply_pressure_delta(&mut self, delta: f64) {
        self.pressure = (self.pressure + delta).max(PRESSURE_FLOOR);
    }
}

// ============================================================================
// Growth layer: E_n · (1 + F_n)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthState {
    n: u32,
    base: f64,
}

impl GrowthState {
    #[must_use]
    pub fn new(n: i64) -> Self {
        Self::with_base(n, DEFAULT_GROWTH_BASE)
    }

    #[must_use]
    pub fn with_base(n: i64, base: f64) -> Self {
        Self {
            n: clamp_step(n),
            base,
        }
    }

    #[must_use]
    pub const fn step(&self) -> u32 {
        self.n
    }

    #[must_use]
    pub const fn base(&self) -> f64 {
        self.base
    }

    /// Store `n` clamped to `[MIN_STEP, MAX_STEP]`. Never fails.
    pub fn set_step(&mut self, n: i64) {
        self.n = clamp_step(n);
    }

    /// `E_n = 2·base^n − 1`, saturated to [`SAFE_MAX`].
    #[must_use]
    pub fn exponential_growth(&self) -> f64 {
        saturate(2.0 * self.base.powi(self.n as i32) - 1.0)
    }

    /// `F_n`, the `(n + 1)`-th term of `1, 1, 2, 3, 5, ...`, so `F_1 = 1`,
    /// `F_2 = 2` and `F_10 = 89`.
    ///
    /// Returned as `f64` holding an integral value: exact up to `F_77`, the
    /// nearest representable value above that. Sums are exact in `u128` and
    /// continue in `f64` past it; a term that would exceed [`SAFE_MAX`]
    /// short-circuits to `SAFE_MAX` truncated to an integer.
    #[must_use]
    pub fn fibonacci_regulation(&self) -> f64 {
        regulation_terms(self.n as usize + 1)
            .last()
            .copied()
            .unwrap_or(1.0)
    }

    /// `E_n · (1 + F_n)`, saturated to [`SAFE_MAX`].
    #[must_use]
    pub fn compute(&self) -> f64 {
        saturate(self.exponential_growth() * (1.0 + self.fibonacci_regulation()))
    }
}

impl Default for GrowthState {
    fn default() -> Self {
        Self::new(i64::from(MIN_STEP))
    }
}

/// The first `count` Fibonacci regulation terms: `[]`, `[1]`, `[1, 1, 2, ...]`.
///
/// `F_n` is term `n + 1` of this sequence. Terms saturate like
/// [`GrowthState::fibonacci_regulation`]: only a sum above [`SAFE_MAX`] turns
/// into the sentinel, and every later term repeats it.
#[must_use]
pub fn fibonacci_sequence(count: usize) -> Vec<f64> {
    regulation_terms(count)
}

/// Running pair of the sequence: exact while it fits in `u128`, then `f64`.
#[derive(Clone, Copy)]
enum Pair {
    Exact(u128, u128),
    Approx(f64, f64),
    Saturated,
}

impl Pair {
    fn step(self) -> (Self, f64) {
        match self {
            Self::Exact(a, b) => match a.checked_add(b) {
                Some(next) => (Self::Exact(b, next), next as f64),
                None => Self::Approx(a as f64, b as f64).step(),
            },
            Self::Approx(a, b) => {
                let next = a + b;
                if next > SAFE_MAX {
                    tracing::trace!(next, "regulation term saturated");
                    (Self::Saturated, SAFE_MAX.trunc())
                } else {
                    (Self::Approx(b, next), next)
                }
            }
            Self::Saturated => (Self::Saturated, SAFE_MAX.trunc()),
        }
    }
}

fn regulation_terms(count: usize) -> Vec<f64> {
    let mut terms = Vec::with_capacity(count);
    let mut pair = Pair::Exact(1, 1);

    for index in 0..count {
        if index < 2 {
            terms.push(1.0);
            continue;
        }
        let (advanced, term) = pair.step();
        pair = advanced;
        terms.push(term);
    }

    terms
}

// ============================================================================
// Cognitive layer: X · Y · Z
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CognitiveState {
    subjectivity: f64,
    purpose: f64,
    time: f64,
}

impl CognitiveState {
    /// Construction takes values as given; only the mutators clamp.
    #[must_use]
    pub const fn new(subjectivity: f64, purpose: f64, time: f64) -> Self {
        Self {
            subjectivity,
            purpose,
            time,
        }
    }

    #[must_use]
    pub const fn subjectivity(&self) -> f64 {
        self.subjectivity
    }

    #[must_use]
    pub fn objectivity(&self) -> f64 {
        1.0 - self.subjectivity
    }

    #[must_use]
    pub const fn purpose(&self) -> f64 {
        self.purpose
    }

    #[must_use]
    pub const fn time(&self) -> f64 {
        self.time
    }

    #[must_use]
    pub fn product(&self) -> f64 {
        self.objectivity() * self.purpose * self.time
    }

    /// `max` before `min` so NaN resolves to 0 instead of propagating.
    pub(crate) fn adjust_subjectivity(&mut self, delta: f64) {
        self.subjectivity = (self.subjectivity + delta).max(0.0).min(1.0);
    }

    pub(crate) fn scale_purpose(&mut self, multiplier: f64) {
        self.purpose = (self.purpose * multiplier).max(PURPOSE_FLOOR);
    }

    pub(crate) fn advance_time(&mut self, delta_time: f64) {
        self.time += delta_time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_step_bounds() {
        assert_eq!(clamp_step(-5), MIN_STEP);
        assert_eq!(clamp_step(0), MIN_STEP);
        assert_eq!(clamp_step(42), 42);
        assert_eq!(clamp_step(101), MAX_STEP);
        assert_eq!(clamp_step(i64::MAX), MAX_STEP);
    }

    #[test]
    fn set_step_clamps_silently() {
        let mut growth = GrowthState::new(5);
        growth.set_step(1_000);
        assert_eq!(growth.step(), MAX_STEP);
        growth.set_step(-1);
        assert_eq!(growth.step(), MIN_STEP);
    }

    #[test]
    fn exponential_growth_known_values() {
        assert_eq!(GrowthState::new(1).exponential_growth(), 5.0);
        assert_eq!(GrowthState::new(2).exponential_growth(), 17.0);
        assert_eq!(GrowthState::new(10).exponential_growth(), 118_097.0);
    }

    #[test]
    fn fibonacci_regulation_known_values() {
        assert_eq!(GrowthState::new(1).fibonacci_regulation(), 1.0);
        assert_eq!(GrowthState::new(2).fibonacci_regulation(), 2.0);
        assert_eq!(GrowthState::new(3).fibonacci_regulation(), 3.0);
        assert_eq!(GrowthState::new(10).fibonacci_regulation(), 89.0);
        // F_100 exceeds u64 but not u128.
        assert_eq!(
            GrowthState::new(100).fibonacci_regulation(),
            573_147_844_013_817_084_101_u128 as f64
        );
    }

    #[test]
    fn compute_is_finite_and_non_negative_over_full_range() {
        for n in 1..=i64::from(MAX_STEP) {
            let value = GrowthState::new(n).compute();
            assert!(value.is_finite(), "n={n} produced {value}");
            assert!(value >= 0.0, "n={n} produced {value}");
        }
    }

    #[test]
    fn overflowing_base_saturates() {
        let growth = GrowthState::with_base(100, 1e10);
        assert_eq!(growth.exponential_growth(), SAFE_MAX);
        assert_eq!(growth.compute(), SAFE_MAX);

        let nan = GrowthState::with_base(3, f64::NAN);
        assert_eq!(nan.exponential_growth(), SAFE_MAX);
        assert_eq!(nan.compute(), SAFE_MAX);
    }

    #[test]
    fn fibonacci_sequence_prefixes() {
        assert!(fibonacci_sequence(0).is_empty());
        assert_eq!(fibonacci_sequence(1), vec![1.0]);
        assert_eq!(
            fibonacci_sequence(7),
            vec![1.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0]
        );
    }

    #[test]
    fn fibonacci_sequence_keeps_growing_past_u128() {
        let terms = fibonacci_sequence(190);
        // terms[186] is the first sum that overflows u128.
        for (index, term) in terms.iter().enumerate().skip(180) {
            assert!(term.is_finite() && *term < 1e40, "term {index} = {term}");
        }
        assert!((terms[186] / 5.385e38 - 1.0).abs() < 1e-3);
        assert!(terms[1..].windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn fibonacci_sequence_saturates_only_above_safe_max() {
        let terms = fibonacci_sequence(1_480);
        assert!(terms[1_474] < SAFE_MAX);
        assert!(terms[1_474] > 8.0e307);
        assert_eq!(terms[1_475], SAFE_MAX.trunc());
        assert_eq!(terms[1_479], SAFE_MAX.trunc());
    }

    #[test]
    fn pressure_floor_holds() {
        let mut foundation = FoundationState::new(1.0, 1.0, 1.0);
        foundation.apply_pressure_delta(-1_000.0);
        assert_eq!(foundation.pressure(), PRESSURE_FLOOR);
        foundation.apply_pressure_delta(f64::NAN);
        assert_eq!(foundation.pressure(), PRESSURE_FLOOR);
    }

    #[test]
    fn cognitive_mutators_clamp() {
        let mut cognitive = CognitiveState::new(0.5, 1.0, 1.0);
        cognitive.adjust_subjectivity(7.0);
        assert_eq!(cognitive.subjectivity(), 1.0);
        assert_eq!(cognitive.product(), 0.0);
        cognitive.adjust_subjectivity(-7.0);
        assert_eq!(cognitive.subjectivity(), 0.0);
        cognitive.adjust_subjectivity(f64::NAN);
        assert_eq!(cognitive.subjectivity(), 0.0);

        cognitive.scale_purpose(0.0);
        assert_eq!(cognitive.purpose(), PURPOSE_FLOOR);
        cognitive.scale_purpose(-3.0);
        assert_eq!(cognitive.purpose(), PURPOSE_FLOOR);
    }
}
