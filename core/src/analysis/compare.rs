use serde::Serialize;

use crate::engine::{AxiomEngine, AxiomSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonCriterion {
    Intelligence,
    Coherence,
    /// Foundation product.
    Foundation,
    /// Cognitive product.
    Cognitive,
    /// Growth product.
    Dynamic,
}

impl ComparisonCriterion {
    pub const DEFAULT: [Self; 2] = [Self::Intelligence, Self::Coherence];

    fn measure(self, snapshot: &AxiomSnapshot) -> f64 {
        match self {
            Self::Intelligence => snapshot.intelligence,
            Self::Coherence => snapshot.coherence(),
            Self::Foundation => snapshot.foundation.product,
            Self::Cognitive => snapshot.cognitive.product,
            Self::Dynamic => snapshot.growth.product,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    A,
    B,
    Tie,
}

impl Winner {
    fn between(a: f64, b: f64) -> Self {
        if a > b {
            Self::A
        } else if b > a {
            Self::B
        } else {
            Self::Tie
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriterionOutcome {
    pub criterion: ComparisonCriterion,
    pub a: f64,
    pub b: f64,
    /// `a − b`
    pub difference: f64,
    pub winner: Winner,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PermutationComparison {
    pub a: AxiomSnapshot,
    pub b: AxiomSnapshot,
    pub outcomes: Vec<CriterionOutcome>,
    pub wins_a: usize,
    pub wins_b: usize,
    pub overall: Winner,
}

/// Compare two configurations on each distinct criterion, in the order given.
/// The overall winner is whoever wins more criteria.
#[must_use]
pub fn compare(
    a: &AxiomEngine,
    b: &AxiomEngine,
    criteria: &[ComparisonCriterion],
) -> PermutationComparison {
    let a = a.snapshot();
    let b = b.snapshot();

    let mut outcomes: Vec<CriterionOutcome> = Vec::with_capacity(criteria.len());
    for &criterion in criteria {
        if outcomes.iter().any(|o| o.criterion == criterion) {
            continue;
        }
        let (va, vb) = (criterion.measure(&a), criterion.measure(&b));
        outcomes.push(CriterionOutcome {
            criterion,
            a: va,
            b: vb,
            difference: va - vb,
            winner: Winner::between(va, vb),
        });
    }

    let wins_a = outcomes.iter().filter(|o| o.winner == Winner::A).count();
    let wins_b = outcomes.iter().filter(|o| o.winner == Winner::B).count();

    PermutationComparison {
        a,
        b,
        outcomes,
        wins_a,
        wins_b,
        overall: Winner::between(wins_a as f64, wins_b as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stronger_impulses_win_intelligence_but_tie_coherence() {
        let a = AxiomEngine::new(2.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1);
        let b = AxiomEngine::default();
        let result = compare(&a, &b, &ComparisonCriterion::DEFAULT);

        assert_eq!(result.outcomes.len(), 2);
        assert_eq!(result.outcomes[0].winner, Winner::A);
        assert_eq!(result.outcomes[0].difference, 10.0);
        assert_eq!(result.outcomes[1].winner, Winner::Tie);
        assert_eq!((result.wins_a, result.wins_b), (1, 0));
        assert_eq!(result.overall, Winner::A);
    }

    #[test]
    fn duplicate_criteria_counted_once() {
        let a = AxiomEngine::default();
        let b = AxiomEngine::new(1.0, 1.0, 1.0, 0.5, 1.0, 1.0, 1);
        let result = compare(
            &a,
            &b,
            &[
                ComparisonCriterion::Cognitive,
                ComparisonCriterion::Cognitive,
                ComparisonCriterion::Dynamic,
            ],
        );
        assert_eq!(result.outcomes.len(), 2);
        assert_eq!(result.outcomes[0].winner, Winner::A);
        assert_eq!(result.outcomes[1].winner, Winner::Tie);
    }

    #[test]
    fn empty_criteria_is_a_tie() {
        let result = compare(&AxiomEngine::default(), &AxiomEngine::default(), &[]);
        assert!(result.outcomes.is_empty());
        assert_eq!(result.overall, Winner::Tie);
    }
}
