#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The clause database: the original formula plus every clause learned from
//! conflicts, in insertion order.
//!
//! The propagation queries [`Cnf::find_conflict`] and [`Cnf::find_unit`]
//! answer exactly what a trail-based scan of the database would answer,
//! first match in insertion order. That policy makes the whole search
//! deterministic for a fixed input; an incremental index (watched literals)
//! could replace the scan without changing any answer.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::literal::{Literal, PackedLiteral};
use crate::sat::solver::Model;
use crate::sat::trail::Trail;
use smallvec::SmallVec;
use std::fmt::Display;

/// A formula in conjunctive normal form, append-only during a solve.
///
/// # Type Parameters
///
/// * `L`: The literal representation. Defaults to `PackedLiteral`.
/// * `S`: The literal storage within each clause.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf<L: Literal = PackedLiteral, S: LiteralStorage<L> = SmallVec<[L; 8]>> {
    clauses: Vec<Clause<L, S>>,
    /// The declared variable count; variables are numbered `1..=num_vars`.
    pub num_vars: usize,
    /// Clauses below this index are original, the rest are learned.
    non_learnt_idx: usize,
}

impl<L: Literal, S: LiteralStorage<L>> Cnf<L, S> {
    /// Builds a formula from already-parsed clauses and a declared variable
    /// count. Tautological clauses are dropped (the search is insensitive to
    /// them); empty clauses are kept, they make the formula unsatisfiable at
    /// level 0.
    pub fn new<I, C>(clauses: I, num_vars: usize) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause<L, S>>,
    {
        let clauses: Vec<Clause<L, S>> = clauses
            .into_iter()
            .map(Into::into)
            .filter(|clause| !clause.is_tautology())
            .collect();
        let non_learnt_idx = clauses.len();

        Self {
            clauses,
            num_vars,
            non_learnt_idx,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The number of original (non-learned) clauses.
    #[must_use]
    pub const fn original_len(&self) -> usize {
        self.non_learnt_idx
    }

    /// The number of clauses learned so far.
    #[must_use]
    pub fn learnt_len(&self) -> usize {
        self.clauses.len() - self.non_learnt_idx
    }

    #[must_use]
    pub fn clause(&self, idx: usize) -> &Clause<L, S> {
        &self.clauses[idx]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause<L, S>> {
        self.clauses.iter()
    }

    /// Appends a learned clause and returns its index.
    pub fn learn(&mut self, clause: Clause<L, S>) -> usize {
        self.clauses.push(clause);
        self.clauses.len() - 1
    }

    /// The first clause in insertion order that the trail falsifies, if any.
    pub fn find_conflict<A: Assignment>(&self, trail: &Trail<L, A>) -> Option<usize> {
        self.clauses
            .iter()
            .position(|clause| trail.is_clause_false(clause))
    }

    /// The first unit clause in insertion order together with its forced
    /// literal, if any.
    pub fn find_unit<A: Assignment>(&self, trail: &Trail<L, A>) -> Option<(L, usize)> {
        self.clauses
            .iter()
            .enumerate()
            .find_map(|(idx, clause)| trail.is_clause_unit(clause).map(|lit| (lit, idx)))
    }

    /// Checks that `model` satisfies every original clause.
    #[must_use]
    pub fn verify(&self, model: &Model) -> bool {
        self.clauses[..self.non_learnt_idx]
            .iter()
            .all(|clause| clause.iter().any(|&lit| model.satisfies(lit)))
    }
}

impl<L: Literal, S: LiteralStorage<L>> From<Vec<Vec<i32>>> for Cnf<L, S> {
    /// Builds a formula from DIMACS-encoded clauses, inferring the variable
    /// count from the largest id mentioned. Convenient in tests; parsed
    /// input goes through [`Cnf::new`] with the declared count instead.
    fn from(clauses: Vec<Vec<i32>>) -> Self {
        let num_vars = clauses
            .iter()
            .flatten()
            .map(|lit| lit.unsigned_abs() as usize)
            .max()
            .unwrap_or(0);
        Self::new(clauses, num_vars)
    }
}

impl<L: Literal, S: LiteralStorage<L>> Display for Cnf<L, S> {
    /// Renders the original clauses in DIMACS CNF format.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.non_learnt_idx)?;
        for clause in &self.clauses[..self.non_learnt_idx] {
            for &lit in clause.iter() {
                write!(f, "{} ", lit.to_dimacs())?;
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::assignment::VecAssignment;

    type TestCnf = Cnf;
    type TestTrail = Trail<PackedLiteral, VecAssignment>;

    fn lit(value: i32) -> PackedLiteral {
        PackedLiteral::from_dimacs(value)
    }

    #[test]
    fn test_new_drops_tautologies_keeps_empty() {
        let cnf = TestCnf::from(vec![vec![1, -1], vec![], vec![2]]);
        assert_eq!(cnf.len(), 2);
        assert!(cnf.clause(0).is_empty());
        assert_eq!(cnf.original_len(), 2);
    }

    #[test]
    fn test_find_conflict_first_in_insertion_order() {
        let cnf = TestCnf::from(vec![vec![1, 2], vec![2], vec![1]]);
        let mut trail = TestTrail::new(2);
        trail.push(lit(-1), true);
        trail.push(lit(-2), false);

        assert_eq!(cnf.find_conflict(&trail), Some(0));
    }

    #[test]
    fn test_empty_clause_is_a_conflict_on_the_empty_trail() {
        let cnf = TestCnf::new(vec![Vec::<i32>::new()], 1);
        let trail = TestTrail::new(1);
        assert_eq!(cnf.find_conflict(&trail), Some(0));
    }

    #[test]
    fn test_find_unit_first_in_insertion_order() {
        let cnf = TestCnf::from(vec![vec![1, 2], vec![2, 3], vec![3]]);
        let mut trail = TestTrail::new(3);
        trail.push(lit(-2), true);

        // clause 0 becomes unit on 1, clause 2 was unit all along; insertion
        // order picks clause 0
        assert_eq!(cnf.find_unit(&trail), Some((lit(1), 0)));

        let fresh = TestTrail::new(3);
        assert_eq!(cnf.find_unit(&fresh), Some((lit(3), 2)));
    }

    #[test]
    fn test_learn_appends() {
        let mut cnf = TestCnf::from(vec![vec![1, 2]]);
        let idx = cnf.learn(Clause::from(vec![-1, 2]));
        assert_eq!(idx, 1);
        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf.original_len(), 1);
        assert_eq!(cnf.learnt_len(), 1);
    }

    #[test]
    fn test_verify() {
        let cnf = TestCnf::from(vec![vec![1, -2], vec![-1, 2, 3]]);
        let satisfying = Model::new(vec![true, false, true]);
        assert!(cnf.verify(&satisfying));

        let falsifying = Model::new(vec![false, true, false]);
        assert!(!cnf.verify(&falsifying));
    }

    #[test]
    fn test_display_dimacs() {
        let cnf = TestCnf::from(vec![vec![1, -2], vec![2, 3]]);
        let rendered = cnf.to_string();
        assert!(rendered.contains("p cnf 3 2"));
        assert!(rendered.contains("1 -2 0"));
        assert!(rendered.contains("2 3 0"));
    }
}
