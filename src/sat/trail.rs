#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The assignment trail: a level-stamped record of every assignment the
//! search has made, in the order it made them.
//!
//! The trail is the single source of truth for the partial valuation. It
//! owns a denormalized [`Assignment`] view kept in sync by every operation,
//! so clause-status queries cost O(1) per literal. Entries are grouped by
//! decision level: levels are nondecreasing along the trail, and the first
//! entry at each positive level is the decision that opened it.

use crate::sat::assignment::{Assignment, VarState};
use crate::sat::clause::Clause;
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::literal::{Literal, Variable};
use crate::sat::solver::Model;

/// The number of decisions on the trail up to and including an entry.
pub type DecisionLevel = usize;

/// One trail entry: a literal and the decision level it was assigned at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<L: Literal> {
    pub lit: L,
    pub level: DecisionLevel,
}

/// The level-stamped assignment stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trail<L: Literal, A: Assignment> {
    entries: Vec<Entry<L>>,
    values: A,
    current_level: DecisionLevel,
}

impl<L: Literal, A: Assignment> Trail<L, A> {
    /// Creates an empty trail over `num_vars` variables, all undefined.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_vars),
            values: A::new(num_vars),
            current_level: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The current decision level: the level of the top entry, `0` when the
    /// trail is empty.
    #[must_use]
    pub const fn current_level(&self) -> DecisionLevel {
        self.current_level
    }

    /// Appends an assignment. A decision opens a new level; a propagation
    /// stays at the current one.
    ///
    /// # Panics
    ///
    /// Panics if the literal's variable already has a value; pushing over an
    /// assigned variable means the caller skipped a status check.
    pub fn push(&mut self, lit: L, decide: bool) {
        assert!(
            self.values.state(lit.variable()).is_unassigned(),
            "variable {} is already assigned, cannot push {lit:?}",
            lit.variable()
        );

        if decide {
            self.current_level += 1;
        }
        self.values.set(lit.variable(), lit.polarity());
        self.entries.push(Entry {
            lit,
            level: self.current_level,
        });
    }

    /// The state of a variable under the current partial valuation.
    #[must_use]
    pub fn value_of(&self, var: Variable) -> VarState {
        self.values.state(var)
    }

    /// A clause is false when every one of its literals is false; an
    /// undefined literal breaks falsity.
    #[must_use]
    pub fn is_clause_false<S: LiteralStorage<L>>(&self, clause: &Clause<L, S>) -> bool {
        clause
            .iter()
            .all(|&lit| self.values.literal_value(lit) == Some(false))
    }

    /// A clause is unit when exactly one of its literals is undefined and
    /// every other is false; the undefined literal is returned. A clause
    /// with a true literal is satisfied and reported as not unit.
    #[must_use]
    pub fn is_clause_unit<S: LiteralStorage<L>>(&self, clause: &Clause<L, S>) -> Option<L> {
        let mut undefined = None;
        for &lit in clause.iter() {
            match self.values.literal_value(lit) {
                Some(true) => return None,
                Some(false) => {}
                None => {
                    if undefined.is_some() {
                        return None;
                    }
                    undefined = Some(lit);
                }
            }
        }
        undefined
    }

    /// The undefined variable with the smallest id, if any. This is the
    /// whole of the decision policy.
    #[must_use]
    pub fn first_undefined(&self) -> Option<Variable> {
        self.values.first_unassigned()
    }

    /// The literal of `clause` that appears latest on the trail, by stack
    /// position. Literals of `clause` not on the trail are ignored; `None`
    /// means no literal of the clause is on the trail at all.
    #[must_use]
    pub fn last_asserted<S: LiteralStorage<L>>(&self, clause: &Clause<L, S>) -> Option<L> {
        self.entries
            .iter()
            .rev()
            .map(|entry| entry.lit)
            .find(|&lit| clause.contains(lit))
    }

    /// Counts the literals of `clause` whose trail entry sits at the current
    /// decision level. Walks from the top and stops at the first entry below
    /// the current level, relying on the trail being grouped by level.
    #[must_use]
    pub fn count_at_current_level<S: LiteralStorage<L>>(&self, clause: &Clause<L, S>) -> usize {
        self.entries
            .iter()
            .rev()
            .take_while(|entry| entry.level >= self.current_level)
            .filter(|entry| clause.contains(entry.lit))
            .count()
    }

    /// Pops entries down to and including the one holding `target`, marking
    /// each popped variable undefined. Returns the popped literals so the
    /// caller can drop their reasons. The current level becomes the level of
    /// the new top entry, `0` if the trail emptied.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not on the trail.
    pub fn backjump_to(&mut self, target: L) -> Vec<L> {
        let mut removed = Vec::new();
        loop {
            let Some(entry) = self.entries.pop() else {
                panic!("backjump target {target:?} is not on the trail");
            };
            self.values.unassign(entry.lit.variable());
            removed.push(entry.lit);
            if entry.lit == target {
                break;
            }
        }
        self.current_level = self.entries.last().map_or(0, |entry| entry.level);
        removed
    }

    /// Removes every entry and returns the trail to level 0.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.values.reset();
        self.current_level = 0;
    }

    /// Totalizes the current valuation into a model; undefined variables
    /// default to false.
    #[must_use]
    pub fn model(&self) -> Model {
        self.values.to_model()
    }
}
