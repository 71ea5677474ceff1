#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Defines the WalkSAT local search solver.
//!
//! The solver runs up to `max_tries` independent tries. Each try starts from a
//! fresh random assignment and performs up to `max_flips` flips. Before every
//! flip the whole formula is checked; if it is satisfied the current assignment
//! is returned as the witness. Otherwise a violated clause is chosen uniformly
//! at random and one of its variables is flipped according to the
//! [`FlipHeuristic`].
//!
//! When every try runs out of flips the solver gives up with
//! [`Verdict::Exhausted`]. That only means no model was found within the
//! budget; the formula may still be satisfiable.
//!
//! All randomness comes from one [`fastrand::Rng`] owned by the solver and
//! seeded from [`SolverConfig::seed`], so a run is reproducible from its seed.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::configs::SolverConfig;
use crate::sat::error::SolverError;
use crate::sat::selection::{UnsatisfiedClauseSelector, count_unsatisfied};
use crate::sat::solver::{SolutionStats, Solver, Verdict};
use crate::sat::variable_selection::{FlipHeuristic, MoveKind};
use fastrand::Rng;
use log::{Level, debug, info, log_enabled, trace};
use std::time::Instant;

/// A WalkSAT solver over one formula.
#[derive(Debug, Clone)]
pub struct WalkSat {
    /// The formula being solved. Never modified.
    cnf: Cnf,
    config: SolverConfig,
    seed: u64,
    /// The assignment the search mutates.
    assignment: Assignment,
    rng: Rng,
    selector: UnsatisfiedClauseSelector,
    heuristic: FlipHeuristic,
    stats: SolutionStats,
}

impl WalkSat {
    /// Creates a solver for `cnf`.
    ///
    /// If the configuration carries no seed, one is drawn now and reported in
    /// the statistics so the run can be repeated.
    ///
    /// # Errors
    ///
    /// If the configuration is invalid (see [`SolverConfig::validate`]).
    pub fn new(cnf: Cnf, config: SolverConfig) -> Result<Self, SolverError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
        let assignment = Assignment::new(cnf.num_vars);
        let selector = UnsatisfiedClauseSelector::new(cnf.num_clauses());

        Ok(Self {
            cnf,
            config,
            seed,
            assignment,
            rng: Rng::with_seed(seed),
            selector,
            heuristic: FlipHeuristic::new(config.noise),
            stats: SolutionStats {
                seed,
                ..SolutionStats::default()
            },
        })
    }

    #[must_use]
    pub const fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    #[must_use]
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The current assignment. After a satisfiable verdict this is the witness.
    #[must_use]
    pub const fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    fn satisfied(&self) -> Verdict {
        info!(
            "model found in try {} after {} flips",
            self.stats.tries, self.stats.flips
        );
        Verdict::Satisfiable(self.assignment.clone())
    }

    /// Runs one try from a fresh random assignment.
    ///
    /// Returns `Some` with the verdict if the search should stop, `None` if the
    /// flips ran out.
    fn run_try(&mut self, deadline: Option<Instant>) -> Option<Verdict> {
        self.assignment.randomise(&mut self.rng);
        self.stats.tries += 1;

        if log_enabled!(Level::Debug) {
            debug!(
                "try {}: {} of {} clauses violated",
                self.stats.tries,
                count_unsatisfied(&self.cnf, &self.assignment),
                self.cnf.num_clauses()
            );
        }

        for _ in 0..self.config.max_flips {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                info!("deadline reached after {} flips", self.stats.flips);
                self.stats.timed_out = true;
                return Some(Verdict::Exhausted);
            }

            if self.cnf.is_satisfied_by(&self.assignment) {
                return Some(self.satisfied());
            }

            let Some(clause_idx) = self
                .selector
                .pick(&self.cnf, &self.assignment, &mut self.rng)
            else {
                return Some(self.satisfied());
            };

            let choice =
                self.heuristic
                    .pick(&self.cnf, &self.assignment, clause_idx, &mut self.rng);

            trace!(
                "flip {}: clause {} ({} violated), {:?} move on {} (break {:?})",
                self.stats.flips,
                clause_idx,
                self.selector.last_count(),
                choice.kind,
                choice.variable,
                choice.break_count
            );

            self.assignment.flip(choice.variable);
            self.stats.flips += 1;
            match choice.kind {
                MoveKind::RandomWalk => self.stats.random_walk_moves += 1,
                MoveKind::Greedy => self.stats.greedy_moves += 1,
            }
        }

        None
    }
}

impl Solver for WalkSat {
    /// Runs the try/flip loop to a verdict.
    ///
    /// The random number generator is restarted from the solver's seed, so
    /// calling this twice gives the same result.
    fn solve(&mut self) -> Verdict {
        self.rng = Rng::with_seed(self.seed);
        self.stats = SolutionStats {
            seed: self.seed,
            ..SolutionStats::default()
        };

        info!(
            "solving {} variables, {} clauses (max tries {}, max flips {}, noise {}, seed {})",
            self.cnf.num_vars,
            self.cnf.num_clauses(),
            self.config.max_tries,
            self.config.max_flips,
            self.config.noise,
            self.seed
        );

        let deadline = self
            .config
            .timeout
            .and_then(|t| Instant::now().checked_add(t));

        for _ in 0..self.config.max_tries {
            if let Some(verdict) = self.run_try(deadline) {
                return verdict;
            }
        }

        info!(
            "no model found after {} tries and {} flips",
            self.stats.tries, self.stats.flips
        );
        Verdict::Exhausted
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::generator::planted_k_sat;
    use std::time::Duration;

    fn solver(clauses: Vec<Vec<i32>>, config: SolverConfig) -> WalkSat {
        let cnf = Cnf::from_clauses(clauses).unwrap();
        WalkSat::new(cnf, config).unwrap()
    }

    #[test]
    fn test_contradiction_exhausts_budget() {
        for seed in 0..20 {
            let mut s = solver(
                vec![vec![1], vec![-1]],
                SolverConfig::default().with_seed(seed),
            );

            assert_eq!(s.solve(), Verdict::Exhausted);

            let stats = s.stats();
            assert_eq!(stats.tries, 5);
            assert_eq!(stats.flips, 5 * 100);
            assert!(!stats.timed_out);
        }
    }

    #[test]
    fn test_satisfiable_pair_returns_verified_witness() {
        for seed in 0..20 {
            let mut s = solver(
                vec![vec![1, 2], vec![-1, -2]],
                SolverConfig::default().with_seed(seed),
            );

            let verdict = s.solve();
            let model = verdict.model().expect("formula is satisfiable");
            assert!(s.cnf().iter().all(|c| c.is_satisfied(model)));
            assert_ne!(model.value(1), model.value(2));
            assert!(s.stats().flips <= 1);
        }
    }

    #[test]
    fn test_empty_formula_is_satisfied() {
        let cnf = Cnf::new(3, Vec::<Vec<i32>>::new()).unwrap();
        let mut s = WalkSat::new(cnf, SolverConfig::default()).unwrap();
        assert!(s.solve().is_sat());
        assert_eq!(s.stats().flips, 0);
    }

    #[test]
    fn test_no_tries_means_no_model() {
        let mut s = solver(vec![vec![1]], SolverConfig::default().with_max_tries(0));
        assert_eq!(s.solve(), Verdict::Exhausted);
        assert_eq!(s.stats().tries, 0);
    }

    #[test]
    fn test_zero_timeout_stops_before_first_flip() {
        let mut s = solver(
            vec![vec![1], vec![-1]],
            SolverConfig::default()
                .with_seed(5)
                .with_timeout(Duration::ZERO),
        );

        assert_eq!(s.solve(), Verdict::Exhausted);
        assert!(s.stats().timed_out);
        assert_eq!(s.stats().flips, 0);
    }

    #[test]
    fn test_invalid_noise_is_rejected() {
        let cnf = Cnf::from_clauses(vec![vec![1]]).unwrap();
        let err = WalkSat::new(cnf, SolverConfig::default().with_noise(-0.1)).unwrap_err();
        assert_eq!(err, SolverError::InvalidNoise(-0.1));
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut rng = Rng::with_seed(99);
        let (cnf, _) = planted_k_sat(30, 120, 3, &mut rng).unwrap();
        let config = SolverConfig::default()
            .with_seed(1234)
            .with_max_tries(3)
            .with_max_flips(200);

        let mut a = WalkSat::new(cnf.clone(), config).unwrap();
        let mut b = WalkSat::new(cnf, config).unwrap();

        assert_eq!(a.solve(), b.solve());
        assert_eq!(a.stats(), b.stats());

        let first = a.stats();
        a.solve();
        assert_eq!(a.stats(), first);
    }

    #[test]
    fn test_solves_planted_instance() {
        let mut rng = Rng::with_seed(2024);
        let (cnf, _) = planted_k_sat(20, 60, 3, &mut rng).unwrap();
        let config = SolverConfig::default()
            .with_seed(7)
            .with_max_tries(50)
            .with_max_flips(10_000);

        let mut s = WalkSat::new(cnf, config).unwrap();
        let verdict = s.solve();
        let model = verdict.model().expect("planted instance is satisfiable");
        assert!(s.cnf().is_satisfied_by(model));
        assert_eq!(
            s.stats().flips,
            s.stats().random_walk_moves + s.stats().greedy_moves
        );
    }

    #[test]
    fn test_pure_greedy_and_pure_walk_both_terminate() {
        for (noise, greedy_only) in [(0.0, true), (1.0, false)] {
            let mut s = solver(
                vec![vec![1, 2, 3], vec![-1, -2], vec![-2, -3], vec![2]],
                SolverConfig::default()
                    .with_seed(17)
                    .with_noise(noise)
                    .with_max_tries(20),
            );
            let verdict = s.solve();
            if let Some(model) = verdict.model() {
                assert!(s.cnf().is_satisfied_by(model));
            }
            let stats = s.stats();
            if greedy_only {
                assert_eq!(stats.random_walk_moves, 0);
            } else {
                assert_eq!(stats.greedy_moves, 0);
            }
        }
    }
}
