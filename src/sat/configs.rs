#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Run parameters for the local search.

use crate::sat::error::SolverError;
use std::time::Duration;

/// Number of independent restarts when none is given.
pub const DEFAULT_MAX_TRIES: usize = 5;

/// Flips allowed per try when none is given.
pub const DEFAULT_MAX_FLIPS: usize = 100;

/// Probability of a random-walk move when none is given.
pub const DEFAULT_NOISE: f64 = 0.4;

/// Parameters fixed for the duration of one solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Number of independent restarts, each from a fresh random assignment.
    pub max_tries: usize,
    /// Flips allowed per try.
    pub max_flips: usize,
    /// Probability in `[0, 1]` of taking a random-walk move instead of a greedy one.
    pub noise: f64,
    /// Seed for the random number generator. A fresh seed is drawn when `None`.
    pub seed: Option<u64>,
    /// Wall-clock limit, checked between flips.
    pub timeout: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_tries: DEFAULT_MAX_TRIES,
            max_flips: DEFAULT_MAX_FLIPS,
            noise: DEFAULT_NOISE,
            seed: None,
            timeout: None,
        }
    }
}

impl SolverConfig {
    #[must_use]
    pub const fn with_max_tries(mut self, max_tries: usize) -> Self {
        self.max_tries = max_tries;
        self
    }

    #[must_use]
    pub const fn with_max_flips(mut self, max_flips: usize) -> Self {
        self.max_flips = max_flips;
        self
    }

    #[must_use]
    pub const fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Checks that the configuration can be run.
    ///
    /// # Errors
    ///
    /// [`SolverError::InvalidNoise`] if `noise` is not a finite value in `[0, 1]`.
    pub fn validate(&self) -> Result<(), SolverError> {
        if (0.0..=1.0).contains(&self.noise) {
            Ok(())
        } else {
            Err(SolverError::InvalidNoise(self.noise))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.max_tries, 5);
        assert_eq!(config.max_flips, 100);
        assert!((config.noise - 0.4).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_noise_bounds() {
        assert!(SolverConfig::default().with_noise(0.0).validate().is_ok());
        assert!(SolverConfig::default().with_noise(1.0).validate().is_ok());
        assert_eq!(
            SolverConfig::default().with_noise(1.5).validate(),
            Err(SolverError::InvalidNoise(1.5))
        );
        assert!(SolverConfig::default().with_noise(f64::NAN).validate().is_err());
    }
}
