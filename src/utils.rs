//! Utility functions for the emberweave library.
//!
//! Numeric helpers shared by the acceptance rules and the statistical
//! test suites.

/// Computes the Boltzmann acceptance probability.
///
/// This is the probability used in the Metropolis acceptance criterion.
///
/// # Parameters
///
/// * `delta`: The fitness difference (candidate - current)
/// * `temperature`: The current temperature
///
/// # Returns
///
/// The acceptance probability as a value between 0 and 1.
///
/// # Examples
///
/// ```
/// use emberweave::utils::boltzmann_probability;
///
/// // Improvements always have probability 1
/// assert_eq!(boltzmann_probability(-1.0, 1.0), 1.0);
///
/// // Worse solutions have lower probability
/// let p = boltzmann_probability(2.0, 1.0);
/// assert!(p > 0.0 && p < 1.0);
///
/// // Higher temperature increases acceptance probability
/// assert!(boltzmann_probability(1.0, 2.0) > boltzmann_probability(1.0, 1.0));
/// ```
pub fn boltzmann_probability(delta: f64, temperature: f64) -> f64 {
    if delta <= 0.0 {
        1.0
    } else {
        (-delta / temperature).exp()
    }
}

/// Calculates the average of a slice of f64 values.
///
/// Returns 0.0 for an empty slice.
///
/// # Examples
///
/// ```
/// use emberweave::utils::average;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(average(&values), 3.0);
/// ```
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
