//! Engine, simulator and analysis working together

use axiom_core::analysis::{
    CoherenceLevel, EnvironmentalChanges, IntelligenceTrend, RecentTrend, RiskFactor, RiskLevel,
    assess_collapse_risk, diagnose, predict_trajectory,
};
use axiom_core::{AxiomEngine, AxiomScenarioRunner, SAFE_MAX};
use axiom_types::AxiomSignals;

#[test]
fn golden_values() {
    let mut engine = AxiomEngine::default();
    assert_eq!(engine.compute_intelligence(), 10.0);
    for _ in 0..9 {
        engine.advance(1.0);
    }
    assert_eq!(engine.step(), 10);
    // time advanced to 10 as well
    assert_eq!(engine.compute_intelligence(), 106_287_300.0);
}

#[test]
fn signals_and_engine_agree_bit_for_bit() {
    let signals = AxiomSignals {
        impulses: 1.3,
        elements: 0.7,
        pressure: 2.2,
        subjectivity: 0.35,
        purpose: 1.9,
        time: 3.5,
        n: 12,
    };
    let a = AxiomEngine::from(signals);
    let b = AxiomEngine::new(1.3, 0.7, 2.2, 0.35, 1.9, 3.5, 12);
    assert_eq!(
        a.compute_intelligence().to_bits(),
        b.compute_intelligence().to_bits()
    );
}

#[test]
fn growth_stays_finite_at_ceiling() {
    let engine = AxiomEngine::new(1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1_000);
    assert_eq!(engine.step(), 100);
    let growth = engine.snapshot().growth.product;
    assert!(growth.is_finite());
    assert!(growth <= SAFE_MAX);
}

#[test]
fn pressure_spike_resolves_back_to_start() {
    let mut runner = AxiomScenarioRunner::new(AxiomEngine::default());
    let history = runner.simulate_pressure_resolution(4.0, 4).to_vec();

    assert_eq!(history.len(), 6);
    assert_eq!(history[1].foundation.pressure, 5.0);
    assert!((history[5].foundation.pressure - 1.0).abs() < 1e-12);
    assert_eq!(history[5].cognitive.subjectivity, 0.0);
    assert_eq!(history[5].step, 5);
}

#[test]
fn diagnosis_and_risk_follow_a_degrading_trajectory() {
    let start = AxiomEngine::new(1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 5);
    assert_eq!(diagnose(&start).coherence_level, CoherenceLevel::High);

    let trajectory = predict_trajectory(
        &start,
        3,
        EnvironmentalChanges {
            pressure_per_step: Some(-0.45),
            subjectivity_per_step: Some(0.3),
            purpose_multiplier_per_step: Some(0.2),
        },
    );
    assert_eq!(
        trajectory.summary.intelligence_trend,
        IntelligenceTrend::Decreasing
    );

    let last = trajectory.snapshots[trajectory.snapshots.len() - 1];
    let end = AxiomEngine::new(
        last.foundation.impulses,
        last.foundation.elements,
        last.foundation.pressure,
        last.cognitive.subjectivity,
        last.cognitive.purpose,
        last.cognitive.time,
        i64::from(last.step),
    );
    assert_eq!(end.compute_intelligence(), last.intelligence);

    // pressure and purpose both end on their floors
    assert_eq!(last.foundation.pressure, 0.01);
    assert_eq!(last.cognitive.purpose, 0.01);

    let risk = assess_collapse_risk(&end, &trajectory.snapshots);
    assert_eq!(risk.recent_trend, Some(RecentTrend::Declining));
    assert_eq!(
        risk.factors,
        vec![
            RiskFactor::WeakFoundation,
            RiskFactor::HighSubjectivity,
            RiskFactor::NoPurpose,
            RiskFactor::LowCoherence,
            RiskFactor::DecliningTrajectory,
        ]
    );
    assert_eq!(risk.score, 25);
    assert_eq!(risk.level, RiskLevel::Critical);
    assert_eq!(diagnose(&end).coherence_level, CoherenceLevel::Low);
}
