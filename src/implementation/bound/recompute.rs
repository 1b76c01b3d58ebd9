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

//! This module provides the recomputation bound. It ignores the notifications
//! of the engine altogether and derives everything it needs from the partial
//! solution each time it is asked for an estimate. Three lower bounds are
//! computed and the strongest one is returned:
//!
//! * B1: the number of undominated vertices divided by the size of the
//!   largest closed neighborhood (rounded up);
//! * B2: the number of candidates that must be picked by decreasing coverage
//!   before their coverages sum up to the number of undominated vertices;
//! * B3: a skip-ahead count over the undominated vertices sorted by the best
//!   coverage any of their candidate neighbors can offer.
//!
//! On a queen graph, a row/column refinement can additionally be enabled.

use std::cmp::Ordering;

use binary_heap_plus::BinaryHeap;
use compare::Compare;

use crate::{BoundStrategy, Error, Graph, PartialSolution};

/// Orders candidate vertices by increasing coverage (so that a max heap pops
/// the candidate covering the most undominated vertices first). Ties are
/// broken in favor of the lowest index.
#[derive(Debug, Clone, Copy)]
pub struct ByCoverage<'b>(&'b [usize]);
impl<'b> ByCoverage<'b> {
    pub fn new(coverage: &'b [usize]) -> Self {
        Self(coverage)
    }
}
impl Compare<usize> for ByCoverage<'_> {
    fn compare(&self, l: &usize, r: &usize) -> Ordering {
        self.0[*l].cmp(&self.0[*r]).then_with(|| r.cmp(l))
    }
}

/// The row/column refinement of an `n x n` queen graph: when too many queens
/// are stacked on the same lines, the rest of the board can no longer be
/// dominated with the number of queens still available.
#[derive(Debug, Clone)]
pub struct QueenLines {
    board: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
}
impl QueenLines {
    /// Fails when the graph does not have `board * board` vertices.
    pub fn new(board: usize, graph: &Graph) -> Result<Self, Error> {
        if board * board != graph.nb_vertices() {
            return Err(Error::BoardMismatch { board, nb_vertices: graph.nb_vertices() });
        }
        Ok(QueenLines { board, rows: vec![0; board], cols: vec![0; board] })
    }

    /// Returns true iff no extension of `state` with a total of at most
    /// `target` queens can dominate the board.
    pub fn rules_out(&mut self, state: &PartialSolution, target: usize) -> bool {
        self.rows.iter_mut().for_each(|x| *x = 0);
        self.cols.iter_mut().for_each(|x| *x = 0);
        for q in state.placed() {
            self.rows[q / self.board] += 1;
            self.cols[q % self.board] += 1;
        }
        let (r1, r2) = Self::two_largest(&self.rows);
        let (c1, c2) = Self::two_largest(&self.cols);

        let single = 2 * target as isize - self.board as isize + 2;
        let double = single + 1;
        r1 as isize > single || c1 as isize > single
            || (r1 + r2) as isize > double || (c1 + c2) as isize > double
    }

    fn two_largest(counts: &[usize]) -> (usize, usize) {
        let mut top = (0, 0);
        for &c in counts {
            if c >= top.0 {
                top = (c, top.0);
            } else if c > top.1 {
                top.1 = c;
            }
        }
        top
    }
}

/// Lower bound recomputed from scratch at every node. The buffers are kept
/// between calls to avoid reallocating them.
#[derive(Debug, Clone)]
pub struct RecomputationBound<'a> {
    graph: &'a Graph,
    lines: Option<QueenLines>,
    undominated: Vec<usize>,
    coverage: Vec<usize>,
    mdd: Vec<usize>,
}

impl<'a> RecomputationBound<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        RecomputationBound {
            graph,
            lines: None,
            undominated: Vec::with_capacity(graph.nb_vertices()),
            coverage: vec![0; graph.nb_vertices()],
            mdd: Vec::with_capacity(graph.nb_vertices()),
        }
    }
    /// Enables the row/column refinement for an `n x n` queen graph.
    pub fn with_queen_lines(mut self, board: usize) -> Result<Self, Error> {
        self.lines = Some(QueenLines::new(board, self.graph)?);
        Ok(self)
    }

    /// B1
    pub fn by_max_degree(&self) -> usize {
        let nb = self.undominated.len();
        let delta = self.graph.max_degree();
        if nb == 0 {
            0
        } else if delta == 0 {
            usize::MAX
        } else {
            (nb + delta - 1) / delta
        }
    }

    /// B2
    pub fn by_greedy_coverage(&self, state: &PartialSolution) -> Option<usize> {
        let target = self.undominated.len();
        let candidates = state.candidates().iter().collect::<Vec<_>>();
        let mut heap = BinaryHeap::from_vec_cmp(candidates, ByCoverage::new(&self.coverage));

        let mut sum = 0;
        let mut picked = 0;
        while sum < target {
            let c = heap.pop()?;
            if self.coverage[c] == 0 {
                return None;
            }
            sum += self.coverage[c];
            picked += 1;
        }
        Some(picked)
    }

    /// B3
    pub fn by_sorted_mdd(&self) -> Option<usize> {
        let mut count = 0;
        let mut i = 0;
        while i < self.mdd.len() {
            let step = self.mdd[i];
            if step == 0 {
                return None;
            }
            count += 1;
            i += step;
        }
        Some(count)
    }

    /// Refreshes the undominated vertices, the coverage of every candidate and
    /// the best coverage reachable from each undominated vertex (sorted).
    fn recompute(&mut self, state: &PartialSolution) {
        self.undominated.clear();
        self.undominated.extend(state.undominated());

        self.coverage.iter_mut().for_each(|x| *x = 0);
        for &u in self.undominated.iter() {
            for &s in self.graph.closed_neighborhood(u) {
                self.coverage[s] += 1;
            }
        }
        for v in 0..self.coverage.len() {
            if !state.is_candidate(v) {
                self.coverage[v] = 0;
            }
        }

        self.mdd.clear();
        for &u in self.undominated.iter() {
            let best = self.graph.closed_neighborhood(u).iter()
                .map(|s| self.coverage[*s])
                .max()
                .unwrap_or(0);
            self.mdd.push(best);
        }
        self.mdd.sort_unstable();
    }
}

impl BoundStrategy for RecomputationBound<'_> {
    fn estimate_remaining(&mut self, state: &PartialSolution, target: usize) -> usize {
        let infeasible = state.nb_vertices() + 1;
        if let Some(lines) = self.lines.as_mut() {
            if lines.rules_out(state, target) {
                return infeasible;
            }
        }

        self.recompute(state);
        if self.undominated.is_empty() {
            return 0;
        }
        let b1 = self.by_max_degree();
        let b2 = self.by_greedy_coverage(state);
        let b3 = self.by_sorted_mdd();
        match (b2, b3) {
            (Some(b2), Some(b3)) => b1.max(b2).max(b3).min(infeasible),
            _ => infeasible,
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
