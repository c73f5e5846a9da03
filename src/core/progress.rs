//! Progress reporting for the annealing engine.
//!
//! The engine emits structured records describing phase transitions,
//! periodic progress, reheating events, and the terminal operator summary.
//! Records are advisory: a sink may drop them freely without affecting the
//! search. The default sink forwards them through the `log` facade.

use crate::core::acceptance::Phase;
use crate::core::selector::OperatorStats;

/// Verbosity of the default log sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Emit at `log::Level::Debug`.
    Debug,
    /// Emit at `log::Level::Info`.
    Info,
    /// Emit at `log::Level::Warn`.
    Warn,
    /// Emit at `log::Level::Error`.
    Error,
    /// Suppress all output.
    None,
}

impl LogLevel {
    fn as_log_level(self) -> Option<log::Level> {
        match self {
            LogLevel::Debug => Some(log::Level::Debug),
            LogLevel::Info => Some(log::Level::Info),
            LogLevel::Warn => Some(log::Level::Warn),
            LogLevel::Error => Some(log::Level::Error),
            LogLevel::None => None,
        }
    }
}

/// Progress-reporting options.
#[derive(Clone, Debug)]
pub struct LogOptions {
    /// Master switch; when false no records are emitted at all.
    pub enabled: bool,
    /// Level the default sink logs at.
    pub level: LogLevel,
    /// Iterations between periodic progress records.
    pub log_interval: u64,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Info,
            log_interval: 1_000,
        }
    }
}

/// Snapshot of one operator's counters for reports and summaries.
#[derive(Clone, Debug, PartialEq)]
pub struct OperatorReport {
    /// Operator name as declared by the move generator.
    pub name: String,
    /// Number of invocations.
    pub attempts: u64,
    /// Number of accepted candidates.
    pub accepted: u64,
    /// Number of accepted candidates that strictly improved fitness.
    pub improvements: u64,
    /// `improvements / attempts`, 0 when the operator was never invoked.
    pub success_rate: f64,
}

impl OperatorReport {
    /// Builds a report from an operator name and its statistics.
    pub fn from_stats(name: &str, stats: &OperatorStats) -> Self {
        Self {
            name: name.to_string(),
            attempts: stats.attempts,
            accepted: stats.accepted,
            improvements: stats.improvements,
            success_rate: stats.success_rate(),
        }
    }
}

/// A structured record describing one observable event of the run.
#[derive(Clone, Debug)]
pub enum ProgressRecord {
    /// A phase began.
    PhaseStarted {
        /// The phase that just started.
        phase: Phase,
        /// Global iteration count at the transition.
        iteration: u64,
        /// Best fitness entering the phase.
        best_fitness: f64,
        /// Best hard-violation count entering the phase.
        best_hard_violations: usize,
    },
    /// Periodic progress, emitted every `log_interval` iterations.
    Progress {
        /// Phase the iteration ran in.
        phase: Phase,
        /// Global iteration count.
        iteration: u64,
        /// Temperature at the end of the iteration.
        temperature: f64,
        /// Fitness of the current state.
        current_fitness: f64,
        /// Hard violations of the current state.
        current_hard_violations: usize,
        /// Fitness of the best state so far.
        best_fitness: f64,
        /// Hard violations of the best state so far.
        best_hard_violations: usize,
    },
    /// The temperature was raised to escape a stagnant region.
    Reheated {
        /// Phase the reheat fired in.
        phase: Phase,
        /// Global iteration count.
        iteration: u64,
        /// Temperature after the reheat.
        temperature: f64,
        /// How many reheats have fired so far, this one included.
        count: u32,
    },
    /// Terminal per-operator summary.
    OperatorSummary {
        /// One report per operator in the library.
        reports: Vec<OperatorReport>,
    },
}

/// Receives progress records from the engine.
///
/// Sinks must treat records as a fire-and-forget side channel: they may
/// not observe or mutate optimizer state, and dropping records must not
/// change the search in any way.
pub trait ProgressSink: Send {
    /// Handles one record.
    fn record(&mut self, record: &ProgressRecord);
}

/// The default sink: forwards records through the `log` facade at the
/// configured level.
pub struct LogSink {
    level: LogLevel,
}

impl LogSink {
    /// Creates a sink logging at `level`.
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }
}

impl ProgressSink for LogSink {
    fn record(&mut self, record: &ProgressRecord) {
        let Some(level) = self.level.as_log_level() else {
            return;
        };

        match record {
            ProgressRecord::PhaseStarted {
                phase,
                iteration,
                best_fitness,
                best_hard_violations,
            } => {
                log::log!(
                    level,
                    "entering {} at iteration {} (best fitness {:.3}, {} hard violations)",
                    phase,
                    iteration,
                    best_fitness,
                    best_hard_violations
                );
            }
            ProgressRecord::Progress {
                phase,
                iteration,
                temperature,
                current_fitness,
                current_hard_violations,
                best_fitness,
                best_hard_violations,
            } => {
                log::log!(
                    level,
                    "[{}] iter {} temp {:.4} current {:.3} ({} hard) best {:.3} ({} hard)",
                    phase,
                    iteration,
                    temperature,
                    current_fitness,
                    current_hard_violations,
                    best_fitness,
                    best_hard_violations
                );
            }
            ProgressRecord::Reheated {
                phase,
                iteration,
                temperature,
                count,
            } => {
                log::log!(
                    level,
                    "reheat #{} during {} at iteration {}: temperature raised to {:.4}",
                    count,
                    phase,
                    iteration,
                    temperature
                );
            }
            ProgressRecord::OperatorSummary { reports } => {
                for report in reports {
                    log::log!(
                        level,
                        "operator {:?}: {} attempts, {} accepted, {} improvements ({:.1}% success)",
                        report.name,
                        report.attempts,
                        report.accepted,
                        report.improvements,
                        report.success_rate * 100.0
                    );
                }
            }
        }
    }
}
