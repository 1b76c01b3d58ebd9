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

//! This module defines the most basic data types that are used throughout all
//! the code of our library (both at the abstraction and implementation levels).
//! These are also the types your client code is likely to work with.

use bit_set::BitSet;

// ----------------------------------------------------------------------------
// --- PARTIAL SOLUTION -------------------------------------------------------
// ----------------------------------------------------------------------------
/// The partial solution being developed by the search engine at some node of
/// the search tree. It is owned and mutated by the engine only; the bound
/// strategies get to read it when they are notified of a change or when they
/// are asked for an estimate.
///
/// At any time, each vertex is in exactly one of three situations:
/// * it is *placed* (part of the partial dominating set),
/// * it is a *candidate* (it may still be placed further down this branch),
/// * it is *pruned* (it was excluded from the current branch and will be
///   given back its candidate status upon backtrack).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialSolution {
    /// The vertices that have been placed so far
    placed: BitSet,
    /// How many vertices are placed
    nb_placed: usize,
    /// The vertices that may still be placed
    candidates: BitSet,
    /// For each vertex, how many placed vertices belong to its closed
    /// neighborhood. A vertex is dominated iff this count is positive.
    cover: Vec<usize>,
    /// How many vertices are dominated
    nb_dominated: usize,
}
impl PartialSolution {
    /// Creates the empty partial solution of a graph having `nb_vertices`
    /// vertices: all of them are candidates, none is dominated.
    pub fn new(nb_vertices: usize) -> Self {
        PartialSolution {
            placed: BitSet::with_capacity(nb_vertices),
            nb_placed: 0,
            candidates: (0..nb_vertices).collect(),
            cover: vec![0; nb_vertices],
            nb_dominated: 0,
        }
    }
    /// The number of vertices in the graph
    #[inline]
    pub fn nb_vertices(&self) -> usize {
        self.cover.len()
    }
    #[inline]
    pub fn nb_placed(&self) -> usize {
        self.nb_placed
    }
    #[inline]
    pub fn nb_dominated(&self) -> usize {
        self.nb_dominated
    }
    #[inline]
    pub fn nb_undominated(&self) -> usize {
        self.nb_vertices() - self.nb_dominated
    }
    /// Returns true iff every vertex is dominated
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.nb_dominated == self.nb_vertices()
    }
    #[inline]
    pub fn is_placed(&self, v: usize) -> bool {
        self.placed.contains(v)
    }
    #[inline]
    pub fn is_candidate(&self, v: usize) -> bool {
        self.candidates.contains(v)
    }
    #[inline]
    pub fn is_dominated(&self, v: usize) -> bool {
        self.cover[v] > 0
    }
    /// The number of placed vertices in the closed neighborhood of `v`
    #[inline]
    pub fn cover(&self, v: usize) -> usize {
        self.cover[v]
    }
    /// The set of candidate vertices
    pub fn candidates(&self) -> &BitSet {
        &self.candidates
    }
    /// Iterates over the placed vertices in increasing order
    pub fn placed(&self) -> impl Iterator<Item = usize> + '_ {
        self.placed.iter()
    }
    /// Iterates over the vertices that are not dominated yet
    pub fn undominated(&self) -> impl Iterator<Item = usize> + '_ {
        self.cover.iter().enumerate().filter(|(_, c)| **c == 0).map(|(v, _)| v)
    }

    // --- mutations (engine only) ---------------------------------------------
    pub(crate) fn remove_candidate(&mut self, v: usize) -> bool {
        self.candidates.remove(v)
    }
    pub(crate) fn add_candidate(&mut self, v: usize) -> bool {
        self.candidates.insert(v)
    }
    pub(crate) fn place(&mut self, v: usize) -> bool {
        let fresh = self.placed.insert(v);
        if fresh {
            self.nb_placed += 1;
        }
        fresh
    }
    pub(crate) fn unplace(&mut self, v: usize) -> bool {
        let present = self.placed.remove(v);
        if present {
            self.nb_placed -= 1;
        }
        present
    }
    /// Records one more placed vertex next to `v`. Returns true iff `v` has
    /// just become dominated.
    pub(crate) fn cover_up(&mut self, v: usize) -> bool {
        self.cover[v] += 1;
        if self.cover[v] == 1 {
            self.nb_dominated += 1;
            true
        } else {
            false
        }
    }
    /// Forgets one placed vertex next to `v`. Returns true iff `v` has just
    /// become undominated (or None if `v` was not covered at all).
    pub(crate) fn cover_down(&mut self, v: usize) -> Option<bool> {
        let c = self.cover[v].checked_sub(1)?;
        self.cover[v] = c;
        if c == 0 {
            self.nb_dominated -= 1;
            Some(true)
        } else {
            Some(false)
        }
    }
}

// ----------------------------------------------------------------------------
// --- STATISTICS -------------------------------------------------------------
// ----------------------------------------------------------------------------
/// Counters describing the effort spent by a search. They are useful for
/// diagnostics only and have no impact on the outcome of the search.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Number of recursive calls
    pub calls: usize,
    /// Number of nodes that were pruned by the bound
    pub prunes: usize,
    /// Number of times the incumbent was improved
    pub improvements: usize,
    /// Number of placed vertices at the shallowest pruned node
    pub shallowest_prune: Option<usize>,
}
impl SearchStatistics {
    /// Fraction of the calls which ended in a prune.
    pub fn prune_ratio(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.prunes as f64 / self.calls as f64
        }
    }
}

// ----------------------------------------------------------------------------
// --- Results ----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A reason explaining why the search stopped before it was complete
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Reason {
    /// It stopped because the configured cutoff criterion was met
    CutoffOccurred
}

/// The outcome of a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Has the search run to its end ? (That is: was it left untouched by
    /// the cutoff ?)
    pub is_exact: bool,
    /// If present, the size of the best dominating set that was found.
    pub best_value: Option<usize>,
}
impl Completion {
    /// Returns true iff a dominating set satisfying the size cap was found.
    pub fn found(&self) -> bool {
        self.best_value.is_some()
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
