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

//! This module provides the domination accountant. It keeps track of how
//! many new vertices each vertex would dominate if it were placed, and uses
//! that information to answer the question "how many more vertices must at
//! least be placed to dominate k more vertices ?" in time proportional to the
//! number of distinct degrees.

use bit_set::BitSet;

use crate::{DegreeBuckets, Error, Graph, PartialSolution};

/// Tracks the domination degree of every vertex: the number of vertices in
/// its closed neighborhood which are not dominated yet. The degree of every
/// vertex is tracked, but each bucket also counts how many of its members are
/// still candidates since only those matter for the bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DominationAccountant {
    buckets: DegreeBuckets,
    /// Per degree: how many candidates have that domination degree
    candidate_count: Vec<usize>,
}

impl DominationAccountant {
    /// Initializes the accountant at the root of the search: every vertex is a
    /// candidate and nothing is dominated.
    pub fn new(graph: &Graph) -> Result<Self, Error> {
        let max_degree = graph.max_degree();
        let degrees = (0..graph.nb_vertices())
            .map(|v| graph.closed_neighborhood(v).len())
            .collect::<Vec<_>>();
        let mut candidate_count = vec![0; max_degree + 1];
        for &d in degrees.iter() {
            candidate_count[d] += 1;
        }
        let buckets = DegreeBuckets::new(max_degree, degrees)?;
        Ok(DominationAccountant { buckets, candidate_count })
    }

    #[inline]
    pub fn domination_degree(&self, v: usize) -> usize {
        self.buckets.degree(v)
    }
    /// The number of candidates whose domination degree is `d`
    #[inline]
    pub fn candidate_count(&self, d: usize) -> usize {
        self.candidate_count[d]
    }
    /// `v` becomes a candidate again
    #[inline]
    pub fn add_candidate(&mut self, v: usize) {
        self.candidate_count[self.buckets.degree(v)] += 1;
    }
    /// `v` stops being a candidate
    #[inline]
    pub fn remove_candidate(&mut self, v: usize) {
        self.candidate_count[self.buckets.degree(v)] -= 1;
    }
    /// One more vertex of the closed neighborhood of `v` is undominated
    pub fn increment(&mut self, v: usize, candidates: &BitSet) -> Result<(), Error> {
        let (old, new) = self.buckets.move_up(v)?;
        self.shift_candidate(v, old, new, candidates);
        Ok(())
    }
    /// One more vertex of the closed neighborhood of `v` is dominated
    pub fn decrement(&mut self, v: usize, candidates: &BitSet) -> Result<(), Error> {
        let (old, new) = self.buckets.move_down(v)?;
        self.shift_candidate(v, old, new, candidates);
        Ok(())
    }
    #[inline]
    fn shift_candidate(&mut self, v: usize, old: usize, new: usize, candidates: &BitSet) {
        if candidates.contains(v) {
            self.candidate_count[old] -= 1;
            self.candidate_count[new] += 1;
        }
    }

    /// Greedy lower bound on the number of candidates that must still be
    /// placed in order to dominate `k` more vertices.
    ///
    /// Candidates are considered by decreasing domination degree: a whole
    /// bucket of degree `d` holding `c` candidates accounts for `d * c`
    /// newly dominated vertices. As soon as the current bucket suffices, the
    /// remainder is rounded up to whole picks. Since no candidate can
    /// dominate more than its degree, this never overestimates.
    ///
    /// Returns `None` when even all the candidates together cannot dominate
    /// `k` more vertices.
    pub fn min_to_dominate(&self, k: usize) -> Option<usize> {
        let mut k = k;
        let mut q = 0;
        if k == 0 {
            return Some(0);
        }
        for d in self.buckets.descending() {
            let c = self.candidate_count[d];
            if d == 0 {
                break;
            }
            if c == 0 {
                continue;
            }
            let covered = d * c;
            if k <= covered {
                return Some(q + (k + d - 1) / d);
            }
            q += c;
            k -= covered;
        }
        None
    }

    /// Compares the accountant against a full recomputation from the given
    /// partial solution.
    pub fn check(&self, graph: &Graph, state: &PartialSolution) -> Result<(), Error> {
        self.buckets.check()?;
        let mut candidate_count = vec![0; self.candidate_count.len()];
        for v in 0..graph.nb_vertices() {
            let expected = graph.closed_neighborhood(v).iter()
                .filter(|u| !state.is_dominated(**u))
                .count();
            let found = self.buckets.degree(v);
            if expected != found {
                return Err(Error::Inconsistent { what: "domination degree", vertex: v, expected, found });
            }
            if state.is_candidate(v) {
                candidate_count[found] += 1;
            }
        }
        for (d, (expected, found)) in candidate_count.iter().zip(self.candidate_count.iter()).enumerate() {
            if expected != found {
                return Err(Error::Inconsistent { what: "candidate count of degree", vertex: d, expected: *expected, found: *found });
            }
        }
        Ok(())
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_domination_accountant {
    use bit_set::BitSet;

    use crate::{DominationAccountant, Graph, PartialSolution};

    /// A star with centre 0 and five leaves
    fn star() -> Graph {
        Graph::from_edges(6, &[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5)]).unwrap()
    }

    #[test]
    fn initial_degrees_are_closed_neighborhood_sizes() {
        let g = star();
        let acc = DominationAccountant::new(&g).unwrap();
        assert_eq!(6, acc.domination_degree(0));
        assert_eq!(2, acc.domination_degree(3));
        assert_eq!(1, acc.candidate_count(6));
        assert_eq!(5, acc.candidate_count(2));
        assert!(acc.check(&g, &PartialSolution::new(6)).is_ok());
    }

    #[test]
    fn the_centre_alone_dominates_the_star() {
        let acc = DominationAccountant::new(&star()).unwrap();
        assert_eq!(Some(1), acc.min_to_dominate(6));
        assert_eq!(Some(1), acc.min_to_dominate(1));
        assert_eq!(Some(0), acc.min_to_dominate(0));
    }

    #[test]
    fn whole_buckets_are_consumed_before_rounding_up() {
        let acc = DominationAccountant::new(&star()).unwrap();
        // 6 from the centre, then ceil(3 / 2) leaves
        assert_eq!(Some(3), acc.min_to_dominate(9));
        // 6 + 5 * 2 = 16 is everything the candidates can offer
        assert_eq!(Some(6), acc.min_to_dominate(16));
    }

    #[test]
    fn exhausting_the_candidates_is_unreachable() {
        let acc = DominationAccountant::new(&star()).unwrap();
        assert_eq!(None, acc.min_to_dominate(17));
    }

    #[test]
    fn needing_more_picks_than_the_largest_degree_is_not_unreachable() {
        // three disjoint edges: every candidate dominates two vertices
        let g = Graph::from_edges(6, &[(0, 1), (2, 3), (4, 5)]).unwrap();
        let acc = DominationAccountant::new(&g).unwrap();
        assert_eq!(2, g.max_degree());
        assert_eq!(Some(3), acc.min_to_dominate(6));

        // two isolated vertices
        let g = Graph::from_adjacency(vec![vec![], vec![]]).unwrap();
        let acc = DominationAccountant::new(&g).unwrap();
        assert_eq!(Some(2), acc.min_to_dominate(2));
        assert_eq!(None, acc.min_to_dominate(3));
    }

    #[test]
    fn removed_candidates_no_longer_count() {
        let mut acc = DominationAccountant::new(&star()).unwrap();
        acc.remove_candidate(0);
        assert_eq!(0, acc.candidate_count(6));
        assert_eq!(Some(3), acc.min_to_dominate(6));
        acc.add_candidate(0);
        assert_eq!(Some(1), acc.min_to_dominate(6));
    }

    #[test]
    fn moves_only_shift_candidate_counts_of_candidates() {
        let mut acc = DominationAccountant::new(&star()).unwrap();
        let mut candidates: BitSet = (0..6).collect();
        acc.decrement(1, &candidates).unwrap();
        assert_eq!(1, acc.domination_degree(1));
        assert_eq!(1, acc.candidate_count(1));
        assert_eq!(4, acc.candidate_count(2));

        candidates.remove(2);
        acc.remove_candidate(2);
        acc.decrement(2, &candidates).unwrap();
        assert_eq!(1, acc.candidate_count(1));
        assert_eq!(3, acc.candidate_count(2));

        acc.increment(2, &candidates).unwrap();
        acc.increment(1, &candidates).unwrap();
        assert_eq!(0, acc.candidate_count(1));
        assert_eq!(4, acc.candidate_count(2));
    }

    #[test]
    fn degree_zero_candidates_cannot_help() {
        let g = Graph::from_adjacency(vec![vec![]]).unwrap();
        let mut acc = DominationAccountant::new(&g).unwrap();
        let candidates: BitSet = (0..1).collect();
        acc.decrement(0, &candidates).unwrap();
        assert_eq!(1, acc.candidate_count(0));
        assert_eq!(None, acc.min_to_dominate(1));
    }

    #[test]
    fn check_detects_a_stale_degree() {
        let g = star();
        let mut acc = DominationAccountant::new(&g).unwrap();
        let candidates: BitSet = (0..6).collect();
        acc.decrement(4, &candidates).unwrap();
        assert!(acc.check(&g, &PartialSolution::new(6)).is_err());
    }
}
