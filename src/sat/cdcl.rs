#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The CDCL search driver.
//!
//! A flat state machine over the trail and the clause database. At each
//! step the rules fire in fixed priority: conflict handling, then unit
//! propagation, then decision; when none applies every variable is assigned
//! and the formula is satisfied. Conflicts are resolved to a 1UIP clause
//! which is learned and then asserted by a non-chronological backjump (or a
//! restart when the learned clause is unit). The same conflict can never
//! repeat, so the search terminates.
//!
//! There is no recursion here: search depth lives on the trail, never on
//! the call stack.

use crate::sat::cnf::Cnf;
use crate::sat::conflict_analysis::{Analyser, Analysis};
use crate::sat::literal::Literal;
use crate::sat::reason::ReasonMap;
use crate::sat::solver::{DefaultConfig, Limits, SearchStats, Solver, SolverConfig, Verdict};
use crate::sat::trail::Trail;
use tracing::debug;

/// A conflict-driven clause-learning solver.
#[derive(Debug, Clone)]
pub struct Cdcl<Config: SolverConfig = DefaultConfig> {
    cnf: Cnf<Config::Literal, Config::Storage>,
    trail: Trail<Config::Literal, Config::Assignment>,
    reasons: ReasonMap,
    analyser: Analyser,
    limits: Limits,
    decisions: u64,
    propagations: u64,
    restarts: u64,
}

impl<Config: SolverConfig> Cdcl<Config> {
    /// Creates a solver with a cooperative conflict budget.
    #[must_use]
    pub fn with_limits(cnf: Cnf<Config::Literal, Config::Storage>, limits: Limits) -> Self {
        Self {
            trail: Trail::new(cnf.num_vars),
            cnf,
            reasons: ReasonMap::new(),
            analyser: Analyser::new(),
            limits,
            decisions: 0,
            propagations: 0,
            restarts: 0,
        }
    }

    /// The clause database, including clauses learned so far.
    #[must_use]
    pub const fn cnf(&self) -> &Cnf<Config::Literal, Config::Storage> {
        &self.cnf
    }

    /// Learns `clause` and asserts `assert` as a propagation with the
    /// learned clause as its reason.
    fn learn_and_assert(
        &mut self,
        clause: crate::sat::clause::Clause<Config::Literal, Config::Storage>,
        assert: Config::Literal,
    ) {
        debug!(learnt = %clause, "learned clause");
        let reason_idx = self.cnf.learn(clause);
        self.trail.push(assert, false);
        self.reasons.set(assert.variable(), reason_idx);
        self.propagations += 1;
    }

    fn handle_conflict(&mut self, conflict_idx: usize) -> Option<Verdict> {
        debug!(conflict = %self.cnf.clause(conflict_idx), level = self.trail.current_level(), "conflict");

        match self
            .analyser
            .analyse(&self.cnf, &self.trail, &self.reasons, conflict_idx)
        {
            Analysis::Ground(learnt) => {
                // canonical record of the derived empty clause
                self.cnf.learn(learnt);
                Some(Verdict::Unsat)
            }
            Analysis::Backjump {
                learnt,
                assert,
                target,
            } => {
                debug!(to = ?target, "backjumping");
                for lit in self.trail.backjump_to(target) {
                    self.reasons.remove(lit.variable());
                }
                self.learn_and_assert(learnt, assert);
                None
            }
            Analysis::Restart { learnt, assert } => {
                debug!("restarting: learned clause is unit");
                self.trail.clear();
                self.reasons.clear();
                self.restarts += 1;
                self.learn_and_assert(learnt, assert);
                None
            }
        }
    }
}

impl<Config: SolverConfig> Solver<Config> for Cdcl<Config> {
    fn new(cnf: Cnf<Config::Literal, Config::Storage>) -> Self {
        Self::with_limits(cnf, Limits::default())
    }

    fn solve(&mut self) -> Verdict {
        loop {
            if self.limits.exhausted(self.analyser.count) {
                return Verdict::Indeterminate;
            }

            if let Some(conflict_idx) = self.cnf.find_conflict(&self.trail) {
                if let Some(verdict) = self.handle_conflict(conflict_idx) {
                    return verdict;
                }
            } else if let Some((lit, reason_idx)) = self.cnf.find_unit(&self.trail) {
                debug!(lit = ?lit, reason = %self.cnf.clause(reason_idx), "propagating");
                self.trail.push(lit, false);
                self.reasons.set(lit.variable(), reason_idx);
                self.propagations += 1;
            } else if let Some(var) = self.trail.first_undefined() {
                let lit = Config::Literal::new(var, true);
                debug!(lit = ?lit, "deciding");
                self.trail.push(lit, true);
                self.decisions += 1;
            } else {
                return Verdict::Sat(self.trail.model());
            }
        }
    }

    fn stats(&self) -> SearchStats {
        SearchStats {
            conflicts: self.analyser.count,
            decisions: self.decisions,
            propagations: self.propagations,
            restarts: self.restarts,
            learnt_clauses: self.cnf.learnt_len() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::solver::Model;

    fn solve(clauses: Vec<Vec<i32>>) -> Verdict {
        let mut solver: Cdcl = Cdcl::new(Cnf::from(clauses));
        solver.solve()
    }

    #[test]
    fn test_empty_formula_is_sat() {
        assert_eq!(solve(vec![]), Verdict::Sat(Model::default()));
    }

    #[test]
    fn test_single_unit_clause() {
        let verdict = solve(vec![vec![1]]);
        let model = verdict.model().expect("expected SAT");
        assert!(model.value(1));
    }

    #[test]
    fn test_empty_clause_is_unsat_without_deciding() {
        let mut solver: Cdcl = Cdcl::new(Cnf::new(vec![Vec::<i32>::new()], 1));
        assert_eq!(solver.solve(), Verdict::Unsat);
        assert_eq!(solver.stats().decisions, 0);
    }

    #[test]
    fn test_contradictory_units_are_unsat() {
        assert_eq!(solve(vec![vec![1], vec![-1]]), Verdict::Unsat);
    }

    #[test]
    fn test_simple_sat_with_propagation() {
        let clauses = vec![vec![1, 2], vec![-1, 2], vec![-2, 3]];
        let cnf: Cnf = Cnf::from(clauses.clone());
        let mut solver: Cdcl = Cdcl::new(cnf);
        let verdict = solver.solve();
        let model = verdict.model().expect("expected SAT");
        assert!(solver.cnf().verify(model));
        // decision policy assigns variable 1 first, positively
        assert!(model.value(1));
        assert!(model.value(2));
        assert!(model.value(3));
    }

    #[test]
    fn test_conflict_driven_unsat() {
        let clauses = vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]];
        assert_eq!(solve(clauses), Verdict::Unsat);
    }

    #[test]
    fn test_unsat_ignores_irrelevant_variables() {
        // variable 3 never constrained
        let clauses = vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2], vec![3, -3]];
        assert_eq!(solve(clauses), Verdict::Unsat);
    }

    #[test]
    fn test_recovers_from_conflict_at_positive_level() {
        // Forces a conflict above level 0 and checks the search recovers.
        let clauses = vec![
            vec![-1, -2, 3],
            vec![-3, 4],
            vec![-3, -4],
            vec![1, 2],
        ];
        let cnf: Cnf = Cnf::from(clauses);
        let mut solver: Cdcl = Cdcl::new(cnf);
        let verdict = solver.solve();
        let model = verdict.model().expect("expected SAT");
        assert!(solver.cnf().verify(model));
        assert!(solver.stats().conflicts > 0);
    }

    #[test]
    fn test_conflict_budget_yields_indeterminate() {
        let clauses = vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]];
        let mut solver: Cdcl = Cdcl::with_limits(
            Cnf::from(clauses),
            Limits {
                max_conflicts: Some(0),
            },
        );
        assert_eq!(solver.solve(), Verdict::Indeterminate);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let clauses = vec![vec![1, 2, -3], vec![-1, 3], vec![2, 3], vec![-2, -3, 1]];
        let first = solve(clauses.clone());
        let second = solve(clauses);
        assert_eq!(first, second);
    }

    #[test]
    fn test_learning_is_idempotent_for_the_verdict() {
        let base = vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]];
        let mut duplicated = base.clone();
        duplicated.push(vec![1, 2]);
        assert_eq!(solve(base), solve(duplicated));
    }
}
