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

//! This module provides the incremental bound. It relies on the domination
//! accountant which is kept in sync with the partial solution by the
//! notifications of the search engine, so that producing an estimate never
//! requires to scan the graph.

use crate::{BoundStrategy, DominationAccountant, Error, Graph, PartialSolution};

/// Lower bound computed from the degree buckets of the domination
/// accountant: the number of candidates with the largest domination degrees
/// that are needed to dominate every undominated vertex.
#[derive(Debug, Clone)]
pub struct IncrementalBound<'a> {
    graph: &'a Graph,
    accountant: DominationAccountant,
}

impl<'a> IncrementalBound<'a> {
    pub fn new(graph: &'a Graph) -> Result<Self, Error> {
        Ok(IncrementalBound { graph, accountant: DominationAccountant::new(graph)? })
    }
    pub fn accountant(&self) -> &DominationAccountant {
        &self.accountant
    }
}

impl BoundStrategy for IncrementalBound<'_> {
    fn on_exclude(&mut self, _state: &PartialSolution, v: usize) -> Result<(), Error> {
        self.accountant.remove_candidate(v);
        Ok(())
    }
    fn on_restore(&mut self, _state: &PartialSolution, v: usize) -> Result<(), Error> {
        self.accountant.add_candidate(v);
        Ok(())
    }
    fn on_dominate(&mut self, state: &PartialSolution, v: usize) -> Result<(), Error> {
        for &x in self.graph.closed_neighborhood(v) {
            self.accountant.decrement(x, state.candidates())?;
        }
        Ok(())
    }
    fn on_undominate(&mut self, state: &PartialSolution, v: usize) -> Result<(), Error> {
        for &x in self.graph.closed_neighborhood(v).iter().rev() {
            self.accountant.increment(x, state.candidates())?;
        }
        Ok(())
    }

    fn estimate_remaining(&mut self, state: &PartialSolution, _target: usize) -> usize {
        // no extension exists at all when the candidates run out
        self.accountant.min_to_dominate(state.nb_undominated())
            .unwrap_or(state.nb_vertices() + 1)
    }

    fn check_consistency(&self, state: &PartialSolution) -> Result<(), Error> {
        self.accountant.check(self.graph, state)
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_incremental_bound {
    use crate::{BoundStrategy, Graph, IncrementalBound, PartialSolution};

    #[test]
    fn at_the_root_one_queen_may_suffice_on_a_3x3_board() {
        let g = Graph::queens(3);
        let mut bound = IncrementalBound::new(&g).unwrap();
        let state = PartialSolution::new(9);
        assert_eq!(1, bound.estimate_remaining(&state, 9));
    }

    #[test]
    fn dominating_a_vertex_lowers_the_degree_of_its_neighborhood() {
        // path 0 - 1 - 2
        let g = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let mut bound = IncrementalBound::new(&g).unwrap();
        let mut state = PartialSolution::new(3);
        state.cover_up(0);
        bound.on_dominate(&state, 0).unwrap();
        assert_eq!(1, bound.accountant().domination_degree(0));
        assert_eq!(2, bound.accountant().domination_degree(1));
        assert_eq!(2, bound.accountant().domination_degree(2));
        assert!(bound.check_consistency(&state).is_ok());

        state.cover_down(0);
        bound.on_undominate(&state, 0).unwrap();
        assert_eq!(3, bound.accountant().domination_degree(1));
        assert!(bound.check_consistency(&state).is_ok());
    }

    #[test]
    fn an_undominated_vertex_without_candidates_cannot_be_extended() {
        // two isolated vertices
        let g = Graph::from_adjacency(vec![vec![], vec![]]).unwrap();
        let mut bound = IncrementalBound::new(&g).unwrap();
        let mut state = PartialSolution::new(2);
        state.remove_candidate(1);
        bound.on_exclude(&state, 1).unwrap();
        assert_eq!(3, bound.estimate_remaining(&state, 2));
        assert!(bound.check_consistency(&state).is_ok());

        state.add_candidate(1);
        bound.on_restore(&state, 1).unwrap();
        assert_eq!(2, bound.estimate_remaining(&state, 2));
    }

    #[test]
    fn a_perfect_matching_needs_one_vertex_per_edge() {
        let g = Graph::from_edges(6, &[(0, 1), (2, 3), (4, 5)]).unwrap();
        let mut bound = IncrementalBound::new(&g).unwrap();
        let state = PartialSolution::new(6);
        assert_eq!(3, bound.estimate_remaining(&state, 6));
    }
}
