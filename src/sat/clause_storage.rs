#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::sat::literal::Literal;
use smallvec::SmallVec;
use std::fmt::Debug;
use std::ops::{Index, IndexMut};
use std::slice::Iter;

/// Backing storage for the literals of a clause.
///
/// Implemented for `Vec<L>` and for `SmallVec<[L; N]>`; the latter keeps
/// short clauses inline and is the crate default.
pub trait LiteralStorage<L: Literal>:
    Index<usize, Output = L>
    + IndexMut<usize, Output = L>
    + FromIterator<L>
    + From<Vec<L>>
    + Extend<L>
    + AsRef<[L]>
    + Clone
    + Default
    + Debug
{
    fn push(&mut self, literal: L);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
    fn iter(&self) -> Iter<'_, L>;
    /// Removes the literal at `index`, preserving the order of the rest.
    fn remove(&mut self, index: usize) -> L;
    fn clear(&mut self);
}

impl<L: Literal> LiteralStorage<L> for Vec<L> {
    fn push(&mut self, literal: L) {
        self.push(literal);
    }

    fn len(&self) -> usize {
        self.len()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    fn iter(&self) -> Iter<'_, L> {
        self.as_slice().iter()
    }

    fn remove(&mut self, index: usize) -> L {
        self.remove(index)
    }

    fn clear(&mut self) {
        self.clear();
    }
}

impl<L: Literal, const N: usize> LiteralStorage<L> for SmallVec<[L; N]>
where
    [L; N]: smallvec::Array<Item = L>,
{
    fn push(&mut self, literal: L) {
        self.push(literal);
    }

    fn len(&self) -> usize {
        self.len()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    fn iter(&self) -> Iter<'_, L> {
        self.as_slice().iter()
    }

    fn remove(&mut self, index: usize) -> L {
        self.remove(index)
    }

    fn clear(&mut self) {
        self.clear();
    }
}
