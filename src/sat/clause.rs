#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Clauses and the resolution algebra the conflict analyser runs on.
//!
//! A clause is a disjunction of literals, stored as an ordered sequence with
//! no duplicates. Order matters here more than in most solvers: resolution
//! preserves the order of first appearance, which keeps the whole search
//! deterministic for a fixed input.

use crate::sat::clause_storage::LiteralStorage;
use crate::sat::literal::{Literal, PackedLiteral};
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::Display;
use std::marker::PhantomData;
use std::ops::Index;

/// An ordered, duplicate-free sequence of literals.
///
/// The empty clause represents falsity.
///
/// # Type Parameters
///
/// * `L`: The literal representation. Defaults to `PackedLiteral`.
/// * `S`: The literal storage. Defaults to `SmallVec<[L; 8]>`, which keeps
///   clauses of up to eight literals inline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause<L: Literal = PackedLiteral, S: LiteralStorage<L> = SmallVec<[L; 8]>> {
    literals: S,
    data: PhantomData<*const L>,
}

impl<L: Literal, S: LiteralStorage<L>> Clause<L, S> {
    /// Creates a clause from a slice of literals, deduplicating while
    /// preserving the order of first appearance.
    #[must_use]
    pub fn new(literals: &[L]) -> Self {
        literals.iter().copied().collect()
    }

    /// Adds a literal unless it is already present.
    pub fn push(&mut self, literal: L) {
        if !self.contains(literal) {
            self.literals.push(literal);
        }
    }

    #[must_use]
    pub fn contains(&self, literal: L) -> bool {
        self.literals.iter().contains(&literal)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// A unit clause contains exactly one literal.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// A tautology contains some literal together with its negation.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .any(|&lit| self.contains(lit.negated()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &L> {
        self.literals.iter()
    }

    /// Removes the first occurrence of `literal`, preserving the order of the
    /// remaining literals. Returns whether anything was removed.
    pub fn remove(&mut self, literal: L) -> bool {
        match self.literals.iter().position(|&l| l == literal) {
            Some(idx) => {
                self.literals.remove(idx);
                true
            }
            None => false,
        }
    }

    /// The elementwise negation of this clause, in the same order.
    #[must_use]
    pub fn invert(&self) -> Self {
        self.literals.iter().map(|lit| lit.negated()).collect()
    }

    /// The resolvent of `self` and `other` over `pivot`.
    ///
    /// The result contains every literal of `self` other than the pivot and
    /// its negation, followed by every such literal of `other` not already
    /// present. Order of first appearance is preserved, duplicates are
    /// suppressed. Either polarity arrangement of the pivot across the two
    /// clauses is accepted.
    ///
    /// # Panics
    ///
    /// Panics if the pivot variable does not occur in both clauses; resolution
    /// on an absent pivot means the caller's reason bookkeeping is broken.
    #[must_use]
    pub fn resolve(&self, other: &Self, pivot: L) -> Self {
        let on_pivot = |l: L| l == pivot || l == pivot.negated();
        assert!(
            self.literals.iter().any(|&l| on_pivot(l)) && other.literals.iter().any(|&l| on_pivot(l)),
            "resolution pivot {pivot:?} does not occur in both clauses"
        );

        let mut resolvent: Self = self
            .literals
            .iter()
            .copied()
            .filter(|&l| !on_pivot(l))
            .collect();
        for &lit in other.literals.iter() {
            if !on_pivot(lit) {
                resolvent.push(lit);
            }
        }
        resolvent
    }
}

impl<L: Literal, S: LiteralStorage<L>> FromIterator<L> for Clause<L, S> {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self {
            literals: iter.into_iter().unique().collect(),
            data: PhantomData,
        }
    }
}

impl<L: Literal, S: LiteralStorage<L>> FromIterator<i32> for Clause<L, S> {
    /// Builds a clause from DIMACS-encoded literals.
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        iter.into_iter().map(L::from_dimacs).collect()
    }
}

impl<L: Literal, S: LiteralStorage<L>> From<Vec<i32>> for Clause<L, S> {
    fn from(literals: Vec<i32>) -> Self {
        literals.into_iter().collect()
    }
}

impl<L: Literal, S: LiteralStorage<L>> AsRef<[L]> for Clause<L, S> {
    fn as_ref(&self) -> &[L] {
        self.literals.as_ref()
    }
}

impl<L: Literal, S: LiteralStorage<L>> Index<usize> for Clause<L, S> {
    type Output = L;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl<L: Literal, S: LiteralStorage<L>> Display for Clause<L, S> {
    /// Renders the clause as `[ p1 ~p2 ]`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for &lit in self.literals.iter() {
            if lit.polarity() {
                write!(f, " p{}", lit.variable())?;
            } else {
                write!(f, " ~p{}", lit.variable())?;
            }
        }
        write!(f, " ]")
    }
}
