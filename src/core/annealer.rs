//! Main annealing engine implementation.
//!
//! This module provides the two-phase driver that sequences operator
//! selection, candidate evaluation, acceptance, reheating, and cooling.

use crate::core::acceptance::{accepts, Phase};
use crate::core::config::{AnnealerConfig, ConfigError};
use crate::core::constraint::{Constraint, ConstraintKind};
use crate::core::fitness::{Evaluation, FitnessEvaluator};
use crate::core::moves::MoveGenerator;
use crate::core::progress::{LogSink, OperatorReport, ProgressRecord, ProgressSink};
use crate::core::selector::OperatorSelector;
use crate::core::state::State;
use rand::rngs::StdRng;
use std::fmt;

/// Share of the iteration budget reserved for the hard-elimination phase.
const HARD_PHASE_SHARE: f64 = 0.60;

/// Immutable record emitted at termination.
///
/// The violation list is produced by re-evaluating the best state on exit,
/// so it is deterministic: re-running the constraints on `best_state`
/// yields the same list.
#[derive(Clone)]
pub struct Solution<S: State> {
    /// The best state found during the run.
    pub best_state: S,
    /// The fitness of the best state.
    pub best_fitness: f64,
    /// Hard-constraint violations remaining in the best state. Zero means
    /// the solution is feasible; callers inspect this before trusting the
    /// soft-penalty ordering.
    pub hard_violations: usize,
    /// Soft-constraint violations remaining in the best state.
    pub soft_violations: usize,
    /// Total iterations performed across both phases.
    pub iterations: u64,
    /// Total reheats performed.
    pub reheats: u32,
    /// Temperature at termination.
    pub final_temperature: f64,
    /// Every violation description of the best state, hard constraints
    /// first.
    pub violations: Vec<String>,
    /// Snapshot of per-operator credit statistics.
    pub operator_stats: Vec<OperatorReport>,
    /// True when the run stopped because no move generator was applicable.
    pub terminated_no_moves: bool,
}

impl<S: State> Solution<S> {
    /// Looks up one operator's report by name.
    pub fn operator(&self, name: &str) -> Option<&OperatorReport> {
        self.operator_stats.iter().find(|r| r.name == name)
    }
}

impl<S: State> fmt::Debug for Solution<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solution")
            .field("best_fitness", &self.best_fitness)
            .field("hard_violations", &self.hard_violations)
            .field("soft_violations", &self.soft_violations)
            .field("iterations", &self.iterations)
            .field("reheats", &self.reheats)
            .field("final_temperature", &self.final_temperature)
            .field("terminated_no_moves", &self.terminated_no_moves)
            .finish()
    }
}

/// Loop-carried variables of one annealing run.
struct RunVars<S: State> {
    current: S,
    current_eval: Evaluation,
    best: S,
    best_eval: Evaluation,
    temperature: f64,
    iterations: u64,
    stagnation: u64,
    reheats: u32,
}

/// The two-phase annealing engine.
///
/// The engine owns the constraint set (through its fitness evaluator), the
/// move-generator library, the adaptive operator selector, and a seeded
/// random number generator. A run proceeds through two regimes:
///
/// 1. **Hard elimination** — drive the hard-violation count to zero while
///    the temperature stays in the high band (`T > T_0 / 10`) and at most
///    60% of the iteration budget is spent. The phase exits early the
///    moment the best state becomes feasible.
/// 2. **Soft optimization** — restart from the best state and minimize
///    soft penalties down to `min_temperature`, never accepting a
///    candidate with more hard violations than the best state has.
///
/// Prolonged stagnation triggers reheating once the schedule has cooled
/// substantially (`T < T_0 / 100`), bounded by `max_reheats`.
///
/// # Examples
///
/// ```
/// use emberweave::prelude::*;
///
/// # #[derive(Clone)]
/// # struct Value(i32);
/// # impl State for Value {}
/// # struct NearZero;
/// # impl Constraint<Value> for NearZero {
/// #     fn name(&self) -> &str { "near-zero" }
/// #     fn kind(&self) -> ConstraintKind { ConstraintKind::Soft { weight: 1.0 } }
/// #     fn evaluate(&self, state: &Value) -> f64 { 1.0 / (1.0 + state.0.abs() as f64) }
/// # }
/// # struct Nudge;
/// # impl MoveGenerator<Value> for Nudge {
/// #     fn name(&self) -> &str { "nudge" }
/// #     fn generate(&self, state: &Value, _t: f64, rng: &mut StdRng) -> Value {
/// #         Value(state.0 + if rng.gen::<bool>() { 1 } else { -1 })
/// #     }
/// # }
/// let constraints: Vec<Box<dyn Constraint<Value>>> = vec![Box::new(NearZero)];
/// let operators: Vec<Box<dyn MoveGenerator<Value>>> = vec![Box::new(Nudge)];
///
/// let config = AnnealerConfig {
///     max_iterations: 2_000,
///     ..AnnealerConfig::default()
/// };
///
/// let mut annealer = Annealer::new(config, constraints, operators, seeded_rng(7)).unwrap();
/// let solution = annealer.solve(&Value(40));
///
/// assert_eq!(solution.hard_violations, 0);
/// assert!(solution.iterations <= 2_000);
/// ```
pub struct Annealer<S: State> {
    config: AnnealerConfig,
    evaluator: FitnessEvaluator<S>,
    operators: Vec<Box<dyn MoveGenerator<S>>>,
    selector: OperatorSelector,
    rng: StdRng,
    sink: Box<dyn ProgressSink>,
}

impl<S: State> Annealer<S> {
    /// Creates an annealer from a validated configuration, a constraint
    /// set, and a move-generator library.
    ///
    /// Fails fast on any configuration error, including a negative weight
    /// on a soft constraint; configuration mistakes are caller programming
    /// errors and are never repaired silently.
    pub fn new(
        config: AnnealerConfig,
        constraints: Vec<Box<dyn Constraint<S>>>,
        operators: Vec<Box<dyn MoveGenerator<S>>>,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        for constraint in &constraints {
            if let ConstraintKind::Soft { weight } = constraint.kind() {
                if weight < 0.0 {
                    return Err(ConfigError::NegativeConstraintWeight {
                        name: constraint.name().to_string(),
                        weight,
                    });
                }
            }
        }

        let selector = OperatorSelector::new(operators.len(), config.exploration_rate);
        let sink = Box::new(LogSink::new(config.logging.level));
        let evaluator = FitnessEvaluator::new(constraints, config.hard_weight);

        Ok(Self {
            config,
            evaluator,
            operators,
            selector,
            rng,
            sink,
        })
    }

    /// Replaces the progress sink. The default sink forwards records
    /// through the `log` facade; tests install recording sinks here.
    pub fn with_sink(mut self, sink: Box<dyn ProgressSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The fitness evaluator this annealer scores candidates with.
    pub fn evaluator(&self) -> &FitnessEvaluator<S> {
        &self.evaluator
    }

    /// Runs the full two-phase optimization from `initial`.
    ///
    /// The caller's state is never mutated: the engine clones it into its
    /// working copies and every accepted candidate is an independent state
    /// produced by a move generator.
    pub fn solve(&mut self, initial: &S) -> Solution<S> {
        self.selector.reset();

        let current = initial.deep_clone();
        let best = current.deep_clone();
        let eval = self.evaluator.evaluate(&best);

        let mut vars = RunVars {
            current,
            current_eval: eval,
            best,
            best_eval: eval,
            temperature: self.config.initial_temperature,
            iterations: 0,
            stagnation: 0,
            reheats: 0,
        };

        self.emit(ProgressRecord::PhaseStarted {
            phase: Phase::HardElimination,
            iteration: 0,
            best_fitness: vars.best_eval.fitness,
            best_hard_violations: vars.best_eval.hard_violations,
        });

        // Phase 1 keeps the temperature in a high band and spends at most
        // its share of the budget; it exits the moment the best state is
        // feasible.
        let hard_floor = self.config.initial_temperature / 10.0;
        let hard_budget = (HARD_PHASE_SHARE * self.config.max_iterations as f64).floor() as u64;
        let mut hard_iterations = 0u64;

        while vars.temperature > hard_floor
            && hard_iterations < hard_budget
            && vars.best_eval.hard_violations > 0
        {
            if !self.iterate(Phase::HardElimination, &mut vars) {
                return self.finish(vars, true);
            }
            hard_iterations += 1;
        }

        // Phase 2 restarts from the best state found so far.
        vars.current = vars.best.deep_clone();
        vars.current_eval = vars.best_eval;
        vars.stagnation = 0;

        self.emit(ProgressRecord::PhaseStarted {
            phase: Phase::SoftOptimization,
            iteration: vars.iterations,
            best_fitness: vars.best_eval.fitness,
            best_hard_violations: vars.best_eval.hard_violations,
        });

        while vars.temperature > self.config.min_temperature
            && vars.iterations < self.config.max_iterations
        {
            if !self.iterate(Phase::SoftOptimization, &mut vars) {
                return self.finish(vars, true);
            }
        }

        self.finish(vars, false)
    }

    /// Runs one iteration: select, generate, evaluate, accept, update.
    ///
    /// Returns false when no operator is applicable, which terminates the
    /// run at the iteration boundary.
    fn iterate(&mut self, phase: Phase, vars: &mut RunVars<S>) -> bool {
        let applicable: Vec<usize> = self
            .operators
            .iter()
            .enumerate()
            .filter(|(_, op)| op.applicable(&vars.current))
            .map(|(idx, _)| idx)
            .collect();

        if applicable.is_empty() {
            return false;
        }

        let choice = self.selector.select(&applicable, &mut self.rng);
        self.selector.record_attempt(choice);

        let candidate =
            self.operators[choice].generate(&vars.current, vars.temperature, &mut self.rng);
        let candidate_eval = self.evaluator.evaluate(&candidate);

        let accepted = accepts(
            phase,
            &vars.current_eval,
            &candidate_eval,
            vars.best_eval.hard_violations,
            vars.temperature,
            &mut self.rng,
        );
        let improved = accepted && candidate_eval.fitness < vars.current_eval.fitness;
        self.selector.record_outcome(choice, accepted, improved);

        if accepted {
            vars.current = candidate;
            vars.current_eval = candidate_eval;
        }

        // Phase 1 ranks the best state lexicographically (hard count, then
        // fitness); phase 2 by fitness alone.
        let best_improved = accepted
            && match phase {
                Phase::HardElimination => {
                    vars.current_eval.hard_violations < vars.best_eval.hard_violations
                        || (vars.current_eval.hard_violations == vars.best_eval.hard_violations
                            && vars.current_eval.fitness < vars.best_eval.fitness)
                }
                Phase::SoftOptimization => vars.current_eval.fitness < vars.best_eval.fitness,
            };

        if best_improved {
            vars.best = vars.current.deep_clone();
            vars.best_eval = vars.current_eval;
            vars.stagnation = 0;
        } else {
            vars.stagnation += 1;
        }

        if vars.stagnation >= self.config.reheat_threshold
            && vars.reheats < self.config.max_reheats
            && vars.temperature < self.config.initial_temperature / 100.0
        {
            vars.temperature *= self.config.reheat_factor;
            vars.reheats += 1;
            vars.stagnation = 0;
            self.emit(ProgressRecord::Reheated {
                phase,
                iteration: vars.iterations,
                temperature: vars.temperature,
                count: vars.reheats,
            });
        }

        vars.temperature *= self.config.cooling_rate;
        vars.iterations += 1;

        let interval = self.config.logging.log_interval;
        if interval > 0 && vars.iterations % interval == 0 {
            self.emit(ProgressRecord::Progress {
                phase,
                iteration: vars.iterations,
                temperature: vars.temperature,
                current_fitness: vars.current_eval.fitness,
                current_hard_violations: vars.current_eval.hard_violations,
                best_fitness: vars.best_eval.fitness,
                best_hard_violations: vars.best_eval.hard_violations,
            });
        }

        true
    }

    /// Re-evaluates the best state and packages the terminal record.
    fn finish(&mut self, vars: RunVars<S>, terminated_no_moves: bool) -> Solution<S> {
        let final_eval = self.evaluator.evaluate(&vars.best);
        let violations = self.evaluator.violation_report(&vars.best);
        let soft_violations = self.evaluator.soft_violations(&vars.best);

        let operator_stats: Vec<OperatorReport> = self
            .operators
            .iter()
            .zip(self.selector.stats())
            .map(|(op, stats)| OperatorReport::from_stats(op.name(), stats))
            .collect();

        self.emit(ProgressRecord::OperatorSummary {
            reports: operator_stats.clone(),
        });

        Solution {
            best_state: vars.best,
            best_fitness: final_eval.fitness,
            hard_violations: final_eval.hard_violations,
            soft_violations,
            iterations: vars.iterations,
            reheats: vars.reheats,
            final_temperature: vars.temperature,
            violations,
            operator_stats,
            terminated_no_moves,
        }
    }

    fn emit(&mut self, record: ProgressRecord) {
        if self.config.logging.enabled {
            self.sink.record(&record);
        }
    }
}
