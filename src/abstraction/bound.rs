// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module defines the `BoundStrategy` trait: the capability the search
//! engine relies upon to estimate how many more vertices a partial solution
//! needs at the very least.

use crate::{Error, PartialSolution};

/// A lower bounding technique for the dominating set search.
///
/// The engine notifies the strategy of every change it makes to the partial
/// solution, *after* the change has been applied to the state (or, when it
/// is undone, after the state has been rolled back). Strategies which
/// maintain incremental data keep it in sync from these notifications; those
/// which recompute everything from the state simply ignore them, which is why
/// all the notifications do nothing by default.
///
/// # Important note
/// The value returned by `estimate_remaining` must be *admissible*: it must
/// never exceed the number of vertices that must still be placed for the
/// partial solution to become a dominating set. Otherwise the search would
/// prune branches that lead to optimal solutions.
pub trait BoundStrategy {
    /// Vertex `v` has just lost its candidate status
    fn on_exclude(&mut self, _state: &PartialSolution, _v: usize) -> Result<(), Error> {
        Ok(())
    }
    /// Vertex `v` has just been given its candidate status back
    fn on_restore(&mut self, _state: &PartialSolution, _v: usize) -> Result<(), Error> {
        Ok(())
    }
    /// Vertex `v` has just become dominated
    fn on_dominate(&mut self, _state: &PartialSolution, _v: usize) -> Result<(), Error> {
        Ok(())
    }
    /// Vertex `v` is no longer dominated
    fn on_undominate(&mut self, _state: &PartialSolution, _v: usize) -> Result<(), Error> {
        Ok(())
    }
    /// Vertex `v` has just been placed in the partial solution
    fn on_place(&mut self, _state: &PartialSolution, _v: usize) -> Result<(), Error> {
        Ok(())
    }
    /// Vertex `v` has just been removed from the partial solution
    fn on_unplace(&mut self, _state: &PartialSolution, _v: usize) -> Result<(), Error> {
        Ok(())
    }

    /// Returns a lower bound on the number of vertices which must still be
    /// placed to extend `state` into a dominating set. The `target` is the
    /// largest total size the search is still interested in; a strategy may
    /// use it to detect that no extension of that size exists, in which case
    /// it returns a value large enough to exceed it.
    fn estimate_remaining(&mut self, state: &PartialSolution, target: usize) -> usize;

    /// Compares whatever incremental data the strategy maintains against a
    /// full recomputation from `state`.
    fn check_consistency(&self, _state: &PartialSolution) -> Result<(), Error> {
        Ok(())
    }
}
