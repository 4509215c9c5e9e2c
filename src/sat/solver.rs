#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Solver-facing types: configuration, the solver trait, verdicts, models
//! and search statistics.

use crate::sat::assignment::{Assignment, VecAssignment};
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, PackedLiteral, Variable};
use smallvec::SmallVec;
use std::fmt::{Debug, Display};

/// Bundles the type choices a solver is instantiated with.
pub trait SolverConfig: Debug + Clone {
    /// The literal representation.
    type Literal: Literal;
    /// The storage backing each clause's literals.
    type Storage: LiteralStorage<Self::Literal>;
    /// The assignment view owned by the trail.
    type Assignment: Assignment;
}

/// The default configuration: packed literals, inline clause storage and a
/// dense assignment view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultConfig;

impl SolverConfig for DefaultConfig {
    type Literal = PackedLiteral;
    type Storage = SmallVec<[PackedLiteral; 8]>;
    type Assignment = VecAssignment;
}

/// A total truth assignment over the declared variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    /// Builds a model from per-variable values, `values[0]` being the value
    /// of variable 1.
    #[must_use]
    pub fn new(values: Vec<bool>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.values.len()
    }

    /// The truth value of a variable.
    ///
    /// # Panics
    ///
    /// Panics if `var` is 0 or beyond the declared variable count.
    #[must_use]
    pub fn value(&self, var: Variable) -> bool {
        self.values[var as usize - 1]
    }

    /// Whether a literal is true under this model.
    #[must_use]
    pub fn satisfies(&self, lit: impl Literal) -> bool {
        self.value(lit.variable()) == lit.polarity()
    }
}

impl Display for Model {
    /// Renders the model as `[ p1 ~p2 p3 ]`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (idx, &value) in self.values.iter().enumerate() {
            if value {
                write!(f, " p{}", idx + 1)?;
            } else {
                write!(f, " ~p{}", idx + 1)?;
            }
        }
        write!(f, " ]")
    }
}

/// The outcome of a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The formula is satisfiable; the model satisfies every original clause.
    Sat(Model),
    /// The formula is unsatisfiable.
    Unsat,
    /// A conflict budget was exhausted before the search finished. Never
    /// produced when no budget is set.
    Indeterminate,
}

impl Verdict {
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Sat(_))
    }

    #[must_use]
    pub const fn model(&self) -> Option<&Model> {
        match self {
            Self::Sat(model) => Some(model),
            _ => None,
        }
    }
}

/// Counters maintained by the search driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    pub conflicts: u64,
    pub decisions: u64,
    pub propagations: u64,
    pub restarts: u64,
    pub learnt_clauses: u64,
}

/// Cooperative bounds on the search, checked at the top of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limits {
    /// Stop with [`Verdict::Indeterminate`] after this many conflicts.
    pub max_conflicts: Option<u64>,
}

impl Limits {
    #[must_use]
    pub const fn exhausted(&self, conflicts: u64) -> bool {
        match self.max_conflicts {
            Some(max) => conflicts >= max,
            None => false,
        }
    }
}

/// The solver interface.
pub trait Solver<Config: SolverConfig = DefaultConfig> {
    /// Creates a solver over the given formula.
    fn new(cnf: Cnf<Config::Literal, Config::Storage>) -> Self;

    /// Runs the search to a verdict. With no limits set this always
    /// terminates with `Sat` or `Unsat`.
    fn solve(&mut self) -> Verdict;

    /// Counters accumulated so far.
    fn stats(&self) -> SearchStats;
}
