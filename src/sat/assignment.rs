#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Variable assignment states and the assignment view.
//!
//! The view is a denormalized copy of what the trail records, kept in sync
//! by the trail itself so that clause-status queries are O(1) per literal.
//! It is never mutated behind the trail's back.
//!
//! Two implementations are provided:
//! - `VecAssignment`: a dense array, the crate default.
//! - `HashMapAssignment`: an `FxHashMap`, for sparse variable sets.

use crate::sat::literal::{Literal, Variable};
use crate::sat::solver::Model;
use rustc_hash::FxHashMap;
use std::fmt::Debug;

/// The assignment state of a propositional variable.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    /// The variable has not been assigned a truth value.
    #[default]
    Unassigned,
    /// The variable has been assigned the contained truth value.
    Assigned(bool),
}

impl VarState {
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        !self.is_assigned()
    }
}

impl From<VarState> for Option<bool> {
    fn from(s: VarState) -> Self {
        match s {
            VarState::Assigned(b) => Some(b),
            VarState::Unassigned => None,
        }
    }
}

/// Interface for tracking variable assignments.
///
/// Variables are numbered `1..=num_vars`; index 0 is never a real variable.
pub trait Assignment: Debug + Clone {
    /// Creates a view over `num_vars` variables, all initially unassigned.
    fn new(num_vars: usize) -> Self;

    /// The number of variables this view is configured for.
    fn num_vars(&self) -> usize;

    /// Assigns a truth value to a variable.
    fn set(&mut self, var: Variable, value: bool);

    /// Returns a variable to the unassigned state.
    fn unassign(&mut self, var: Variable);

    /// Unassigns every variable.
    fn reset(&mut self);

    /// The state of a variable.
    fn state(&self, var: Variable) -> VarState;

    /// The truth value of a variable, if assigned.
    fn var_value(&self, var: Variable) -> Option<bool> {
        self.state(var).into()
    }

    /// The truth value of a literal under the current assignment, or `None`
    /// if its variable is unassigned.
    fn literal_value(&self, lit: impl Literal) -> Option<bool> {
        self.var_value(lit.variable()).map(|b| b == lit.polarity())
    }

    /// Iterates the unassigned variables in increasing id order.
    fn unassigned(&self) -> impl Iterator<Item = Variable> + '_ {
        #[allow(clippy::cast_possible_truncation)]
        let last = self.num_vars() as Variable;
        (1..=last).filter(move |&var| self.state(var).is_unassigned())
    }

    /// The unassigned variable with the smallest id, if any.
    fn first_unassigned(&self) -> Option<Variable> {
        self.unassigned().next()
    }

    /// Totalizes the current assignment into a model: every variable not
    /// assigned by the search defaults to false.
    fn to_model(&self) -> Model {
        #[allow(clippy::cast_possible_truncation)]
        let last = self.num_vars() as Variable;
        Model::new(
            (1..=last)
                .map(|var| self.var_value(var).unwrap_or(false))
                .collect(),
        )
    }
}

/// A dense assignment view backed by a `Vec<VarState>`.
///
/// Slot 0 exists but is never touched, so variable ids index directly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VecAssignment {
    states: Vec<VarState>,
}

impl Assignment for VecAssignment {
    fn new(num_vars: usize) -> Self {
        Self {
            states: vec![VarState::Unassigned; num_vars + 1],
        }
    }

    fn num_vars(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    fn set(&mut self, var: Variable, value: bool) {
        self.states[var as usize] = VarState::Assigned(value);
    }

    fn unassign(&mut self, var: Variable) {
        self.states[var as usize] = VarState::Unassigned;
    }

    fn reset(&mut self) {
        self.states.fill(VarState::Unassigned);
    }

    fn state(&self, var: Variable) -> VarState {
        self.states[var as usize]
    }
}

/// A sparse assignment view backed by an `FxHashMap`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HashMapAssignment {
    map: FxHashMap<Variable, bool>,
    num_vars: usize,
}

impl Assignment for HashMapAssignment {
    fn new(num_vars: usize) -> Self {
        Self {
            map: FxHashMap::default(),
            num_vars,
        }
    }

    fn num_vars(&self) -> usize {
        self.num_vars
    }

    fn set(&mut self, var: Variable, value: bool) {
        self.map.insert(var, value);
    }

    fn unassign(&mut self, var: Variable) {
        self.map.remove(&var);
    }

    fn reset(&mut self) {
        self.map.clear();
    }

    fn state(&self, var: Variable) -> VarState {
        self.map
            .get(&var)
            .map_or(VarState::Unassigned, |&b| VarState::Assigned(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::PackedLiteral;

    fn exercise<A: Assignment>(a: &mut A) {
        a.set(1, true);
        a.set(2, false);

        assert_eq!(a.var_value(1), Some(true));
        assert_eq!(a.var_value(2), Some(false));
        assert_eq!(a.var_value(3), None);

        assert_eq!(a.literal_value(PackedLiteral::from_dimacs(1)), Some(true));
        assert_eq!(a.literal_value(PackedLiteral::from_dimacs(-1)), Some(false));
        assert_eq!(a.literal_value(PackedLiteral::from_dimacs(2)), Some(false));
        assert_eq!(a.literal_value(PackedLiteral::from_dimacs(-2)), Some(true));
        assert_eq!(a.literal_value(PackedLiteral::from_dimacs(3)), None);

        assert_eq!(a.first_unassigned(), Some(3));
        assert_eq!(a.unassigned().collect::<Vec<_>>(), vec![3, 4]);

        a.unassign(1);
        assert_eq!(a.var_value(1), None);
        assert_eq!(a.first_unassigned(), Some(1));

        a.set(1, true);
        let model = a.to_model();
        assert!(model.value(1));
        assert!(!model.value(2));
        // unassigned variables totalize to false
        assert!(!model.value(3));
        assert!(!model.value(4));

        a.reset();
        assert_eq!(a.unassigned().count(), 4);
    }

    #[test]
    fn test_vec_assignment() {
        let mut a = VecAssignment::new(4);
        assert_eq!(a.num_vars(), 4);
        exercise(&mut a);
    }

    #[test]
    fn test_hashmap_assignment() {
        let mut a = HashMapAssignment::new(4);
        assert_eq!(a.num_vars(), 4);
        exercise(&mut a);
    }
}
