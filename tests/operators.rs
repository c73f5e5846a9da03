//! Component-level behavior: operator selection statistics, the two
//! acceptance rules, the violation-counting rule, and configuration
//! validation.

use emberweave::prelude::*;
use emberweave::utils::average;

const SEED: u64 = 7;

fn selection_fractions(selector: &OperatorSelector, applicable: &[usize], draws: u32) -> Vec<f64> {
    let mut rng = seeded_rng(SEED);
    let max_index = *applicable.iter().max().unwrap();
    let mut counts = vec![0u32; max_index + 1];
    for _ in 0..draws {
        counts[selector.select(applicable, &mut rng)] += 1;
    }
    counts
        .into_iter()
        .map(|c| c as f64 / draws as f64)
        .collect()
}

#[test]
fn cold_start_selection_is_uniform() {
    let selector = OperatorSelector::new(2, 0.3);
    let fractions = selection_fractions(&selector, &[0, 1], 10_000);

    println!("cold-start fractions: {fractions:?}");
    assert!(fractions[0] > 0.47 && fractions[0] < 0.53);
    assert!(fractions[1] > 0.47 && fractions[1] < 0.53);
}

#[test]
fn exploration_floor_keeps_losing_operators_in_play() {
    let mut selector = OperatorSelector::new(2, 0.3);

    // Operator 0 improves on every attempt; operator 1 never does.
    for _ in 0..10 {
        selector.record_attempt(0);
        selector.record_outcome(0, true, true);
        selector.record_attempt(1);
        selector.record_outcome(1, false, false);
    }
    assert_eq!(selector.stats()[0].success_rate(), 1.0);
    assert_eq!(selector.stats()[1].success_rate(), 0.0);

    let fractions = selection_fractions(&selector, &[0, 1], 10_000);

    // The loser still gets the exploration share: 0.3 * 1/2 = 15%.
    println!("biased fractions: {fractions:?}");
    assert!(
        fractions[1] > 0.10 && fractions[1] < 0.20,
        "exploration floor violated: {}",
        fractions[1]
    );
    assert!(fractions[0] > 0.80);
}

#[test]
fn selection_is_proportional_to_success_rates() {
    let mut selector = OperatorSelector::new(2, 0.3);

    // Success rates 0.75 and 0.25.
    for i in 0..4 {
        selector.record_attempt(0);
        selector.record_outcome(0, true, i < 3);
        selector.record_attempt(1);
        selector.record_outcome(1, true, i < 1);
    }

    let fractions = selection_fractions(&selector, &[0, 1], 10_000);

    // Expected: 0.7 * 0.75 + 0.3 * 0.5 = 0.675 for operator 0.
    println!("proportional fractions: {fractions:?}");
    assert!(fractions[0] > 0.62 && fractions[0] < 0.73);
}

#[test]
fn non_applicable_operators_are_never_selected() {
    let mut selector = OperatorSelector::new(3, 0.3);
    // Give the excluded operator the best record on offer.
    selector.record_attempt(1);
    selector.record_outcome(1, true, true);

    let mut rng = seeded_rng(SEED);
    for _ in 0..5_000 {
        let choice = selector.select(&[0, 2], &mut rng);
        assert_ne!(choice, 1, "selected an operator that was not applicable");
    }
}

#[test]
fn hard_phase_rule_orders_by_violation_count_first() {
    let mut rng = seeded_rng(SEED);

    // Fewer hard violations: accepted regardless of fitness.
    for _ in 0..100 {
        assert!(hard_phase_accepts(3, 2, 0.0, 1e9, 1e-9, &mut rng));
    }

    // More hard violations: rejected regardless of fitness.
    for _ in 0..100 {
        assert!(!hard_phase_accepts(1, 2, 1e9, 0.0, 1e9, &mut rng));
    }

    // Same count, better fitness: accepted.
    assert!(hard_phase_accepts(2, 2, 10.0, 5.0, 1e-9, &mut rng));

    // Same count, worse fitness at frozen temperature: rejected.
    for _ in 0..100 {
        assert!(!hard_phase_accepts(2, 2, 5.0, 6.0, 1e-9, &mut rng));
    }
}

#[test]
fn soft_phase_rule_never_regresses_past_the_best() {
    let mut rng = seeded_rng(SEED);

    // Even at extreme temperature, exceeding the best hard count loses.
    for _ in 0..1_000 {
        assert!(!soft_phase_accepts(0, 1, 1e9, 0.0, 1e12, &mut rng));
    }

    // Improving on the best hard count always wins.
    for _ in 0..100 {
        assert!(soft_phase_accepts(2, 1, 0.0, 1e9, 1e-9, &mut rng));
    }

    // Equal hard count falls back to Metropolis on fitness.
    assert!(soft_phase_accepts(0, 0, 10.0, 4.0, 1e-9, &mut rng));
    for _ in 0..100 {
        assert!(!soft_phase_accepts(0, 0, 4.0, 10.0, 1e-9, &mut rng));
    }
}

#[test]
fn degenerate_fitness_is_never_accepted() {
    let mut rng = seeded_rng(SEED);

    for _ in 0..100 {
        // NaN and infinite candidates lose even with an improved hard count.
        assert!(!hard_phase_accepts(5, 0, 100.0, f64::NAN, 1e6, &mut rng));
        assert!(!hard_phase_accepts(5, 0, 100.0, f64::INFINITY, 1e6, &mut rng));
        assert!(!soft_phase_accepts(5, 0, 100.0, f64::NAN, 1e6, &mut rng));
        assert!(!soft_phase_accepts(5, 0, 100.0, f64::INFINITY, 1e6, &mut rng));
        assert!(!metropolis(100.0, f64::NAN, 1e6, &mut rng));
    }
}

#[test]
fn metropolis_acceptance_tracks_the_boltzmann_probability() {
    let mut rng = seeded_rng(SEED);

    // At T = 10 a +5 worsening should survive about 60% of the time.
    let outcomes: Vec<f64> = (0..2_000)
        .map(|_| {
            if metropolis(0.0, 5.0, 10.0, &mut rng) {
                1.0
            } else {
                0.0
            }
        })
        .collect();
    let rate = average(&outcomes);

    println!("empirical acceptance rate: {rate:.3}");
    assert!(rate > 0.55 && rate < 0.66);
}

#[derive(Clone)]
struct Unit;

impl State for Unit {}

struct Scored {
    score: f64,
    listed: Option<usize>,
}

impl Constraint<Unit> for Scored {
    fn name(&self) -> &str {
        "scored"
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Hard
    }

    fn evaluate(&self, _state: &Unit) -> f64 {
        self.score
    }

    fn violations(&self, _state: &Unit) -> Option<Vec<String>> {
        self.listed
            .map(|n| (0..n).map(|i| format!("violation {i}")).collect())
    }
}

#[test]
fn explicit_violation_lists_take_priority_over_inference() {
    // The list says 3 even though the score would infer 1.
    let constraint = Scored {
        score: 0.5,
        listed: Some(3),
    };
    assert_eq!(violation_count(&constraint as &dyn Constraint<Unit>, &Unit), 3);

    // An empty list means satisfied, whatever the score shape.
    let constraint = Scored {
        score: 0.4,
        listed: Some(0),
    };
    assert_eq!(violation_count(&constraint as &dyn Constraint<Unit>, &Unit), 0);
}

#[test]
fn violation_counts_are_inferred_from_the_score_shape() {
    let count = |score: f64| {
        let constraint = Scored {
            score,
            listed: None,
        };
        violation_count(&constraint as &dyn Constraint<Unit>, &Unit)
    };

    assert_eq!(count(1.0), 0);
    assert_eq!(count(0.5), 1); // 1/(1+1)
    assert_eq!(count(0.25), 3); // 1/(1+3)
    assert_eq!(count(0.1), 9);
    // Below 1 always counts at least one violation, even when rounding
    // would say zero.
    assert_eq!(count(0.9), 1);
    // A zero score cannot encode a multiplicity.
    assert_eq!(count(0.0), 1);
}

#[test]
fn invalid_configurations_fail_at_construction() {
    let base = AnnealerConfig::default();
    assert!(base.validate().is_ok());

    let broken = AnnealerConfig {
        initial_temperature: -1.0,
        ..base.clone()
    };
    assert!(matches!(
        broken.validate(),
        Err(ConfigError::NonPositiveTemperature(_))
    ));

    let broken = AnnealerConfig {
        initial_temperature: 0.005,
        ..base.clone()
    };
    assert!(matches!(
        broken.validate(),
        Err(ConfigError::TemperatureOrder { .. })
    ));

    let broken = AnnealerConfig {
        cooling_rate: 1.0,
        ..base.clone()
    };
    assert!(matches!(
        broken.validate(),
        Err(ConfigError::CoolingRateOutOfRange(_))
    ));

    let broken = AnnealerConfig {
        hard_weight: 0.0,
        ..base.clone()
    };
    assert!(matches!(
        broken.validate(),
        Err(ConfigError::NonPositiveHardWeight(_))
    ));

    let broken = AnnealerConfig {
        reheat_factor: 0.5,
        ..base.clone()
    };
    assert!(matches!(
        broken.validate(),
        Err(ConfigError::ReheatFactorTooSmall(_))
    ));

    let broken = AnnealerConfig {
        exploration_rate: 0.1,
        ..base
    };
    assert!(matches!(
        broken.validate(),
        Err(ConfigError::ExplorationRateOutOfRange(_))
    ));
}

struct NegativeWeight;

impl Constraint<Unit> for NegativeWeight {
    fn name(&self) -> &str {
        "negative-weight"
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Soft { weight: -2.0 }
    }

    fn evaluate(&self, _state: &Unit) -> f64 {
        1.0
    }
}

struct Hold;

impl MoveGenerator<Unit> for Hold {
    fn name(&self) -> &str {
        "hold"
    }

    fn generate(&self, state: &Unit, _temperature: f64, _rng: &mut StdRng) -> Unit {
        state.clone()
    }
}

#[test]
fn negative_soft_weights_fail_at_construction() {
    let constraints: Vec<Box<dyn Constraint<Unit>>> = vec![Box::new(NegativeWeight)];
    let operators: Vec<Box<dyn MoveGenerator<Unit>>> = vec![Box::new(Hold)];

    let result = Annealer::new(
        AnnealerConfig::default(),
        constraints,
        operators,
        seeded_rng(SEED),
    );

    assert!(matches!(
        result,
        Err(ConfigError::NegativeConstraintWeight { .. })
    ));
}
