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

//! This module provides the implementation of the depth-first branch and
//! bound solver. At each node of the search tree, it picks an undominated
//! vertex `v` and branches on the candidates of its closed neighborhood: one
//! of them must belong to any dominating set extending the current partial
//! solution. The candidates which have already been tried are excluded from
//! the subsequent branches so that no set is ever enumerated twice.

use tracing::{info, warn};

use crate::{BoundKind, Completion, Cutoff, Error, Graph, IncrementalBound, NoCutoff, RecomputationBound, SearchConfig, SearchStatistics, Solution, Solver};

use super::context::{SearchContext, SearchOutcome};

/// The depth-first branch and bound solver for the minimum dominating set
/// problem.
///
/// # Example
/// ```
/// # use domset::*;
/// let graph  = Graph::queens(4);
/// let config = SearchConfigBuilder::default().gamma(2).build().unwrap();
/// let mut solver = BranchAndBound::new(&graph, config);
///
/// let outcome = solver.minimize().unwrap();
/// assert!(outcome.found());
/// assert!(graph.is_dominating(&solver.best_solution().unwrap()));
/// ```
pub struct BranchAndBound<'a> {
    /// The graph whose vertices must be dominated
    graph: &'a Graph,
    /// How the search must be carried out
    config: SearchConfig,
    /// A cutoff heuristic meant to decide when to stop the search
    cutoff: &'a dyn Cutoff,
    /// If set, this keeps the best dominating set known so far
    best_sol: Option<Solution>,
    /// The counters of the last search
    stats: SearchStatistics,
}

impl<'a> BranchAndBound<'a> {
    pub fn new(graph: &'a Graph, config: SearchConfig) -> Self {
        BranchAndBound { graph, config, cutoff: &NoCutoff, best_sol: None, stats: SearchStatistics::default() }
    }
    /// Uses the given cutoff to interrupt the search
    pub fn with_cutoff(mut self, cutoff: &'a dyn Cutoff) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// The largest size of a dominating set that may be reported
    fn cap(&self) -> usize {
        self.config.gamma.unwrap_or(usize::MAX)
    }

    fn run(&self) -> Result<SearchOutcome, Error> {
        let incumbent = self.best_sol.clone();
        match self.config.bound {
            BoundKind::Incremental => {
                let bound = IncrementalBound::new(self.graph)?;
                SearchContext::new(self.graph, &self.config, self.cutoff, bound, incumbent)?.run()
            }
            BoundKind::Recompute => {
                let mut bound = RecomputationBound::new(self.graph);
                if let Some(board) = self.config.queen_board {
                    bound = bound.with_queen_lines(board)?;
                }
                SearchContext::new(self.graph, &self.config, self.cutoff, bound, incumbent)?.run()
            }
        }
    }
}

impl Solver for BranchAndBound<'_> {
    /// Explores the search tree depth first. When a size cap is configured,
    /// the search stops at the first dominating set fitting the cap;
    /// otherwise it proves the optimality of the smallest set it finds.
    fn minimize(&mut self) -> Result<Completion, Error> {
        let known = self.best_sol.as_ref().map(|s| s.len()).filter(|size| *size <= self.cap());
        if self.config.gamma.is_some() && known.is_some() {
            self.stats = SearchStatistics::default();
            return Ok(Completion { is_exact: true, best_value: known });
        }

        let outcome = self.run()?;
        self.best_sol = outcome.best;
        self.stats = outcome.stats;

        let best_value = self.best_value().filter(|size| *size <= self.cap());
        let is_exact = outcome.abort.is_none();
        if let Some(reason) = outcome.abort {
            warn!(?reason, calls = self.stats.calls, best = ?best_value, "search interrupted");
        }
        info!(
            found = best_value.is_some(),
            best = ?best_value,
            calls = self.stats.calls,
            prunes = self.stats.prunes,
            exact = is_exact,
            "search complete");

        Ok(Completion { is_exact, best_value })
    }
    /// Returns the size of the best dominating set that has been identified
    /// (primal included).
    fn best_value(&self) -> Option<usize> {
        self.best_sol.as_ref().map(|s| s.len())
    }
    /// Returns the best dominating set that has been identified.
    fn best_solution(&self) -> Option<Solution> {
        self.best_sol.clone()
    }
    /// Sets a primal: a dominating set known beforehand. It is only kept if
    /// it improves on the best known set.
    fn set_primal(&mut self, mut solution: Solution) -> Result<(), Error> {
        let n = self.graph.nb_vertices();
        if let Some(&vertex) = solution.iter().find(|v| **v >= n) {
            return Err(Error::UnknownVertex { vertex, nb_vertices: n });
        }
        if let Some(v) = self.graph.first_undominated(&solution) {
            return Err(Error::NotDominating(v));
        }
        solution.sort_unstable();
        solution.dedup();
        if self.best_value().map_or(true, |best| solution.len() < best) {
            self.best_sol = Some(solution);
        }
        Ok(())
    }
    fn statistics(&self) -> SearchStatistics {
        self.stats
    }
}

#[cfg(test)]
mod test_branch_and_bound {
    use crate::{BranchAndBound, Error, Graph, SearchConfig, SearchConfigBuilder, Solver};

    #[test]
    fn a_primal_must_dominate_the_graph() {
        let g = Graph::queens(4);
        let mut solver = BranchAndBound::new(&g, SearchConfig::default());
        assert_eq!(Err(Error::NotDominating(6)), solver.set_primal(vec![0]));
        assert_eq!(Err(Error::UnknownVertex { vertex: 16, nb_vertices: 16 }), solver.set_primal(vec![16]));
        assert_eq!(None, solver.best_value());
    }

    #[test]
    fn a_larger_primal_does_not_replace_a_smaller_one() {
        let g = Graph::queens(4);
        let mut solver = BranchAndBound::new(&g, SearchConfig::default());
        solver.set_primal(vec![5, 6]).unwrap();
        solver.set_primal(vec![0, 1, 2, 3]).unwrap();
        assert_eq!(Some(vec![5, 6]), solver.best_solution());
    }

    #[test]
    fn a_fitting_primal_answers_the_decision_problem_without_searching() {
        let g = Graph::queens(4);
        let config = SearchConfigBuilder::default().gamma(3).build().unwrap();
        let mut solver = BranchAndBound::new(&g, config);
        solver.set_primal(vec![10, 0]).unwrap();
        let outcome = solver.minimize().unwrap();
        assert_eq!(Some(2), outcome.best_value);
        assert_eq!(0, solver.statistics().calls);
        assert_eq!(Some(vec![0, 10]), solver.best_solution());
    }

    #[test]
    fn an_optimal_primal_leaves_nothing_to_improve() {
        let g = Graph::queens(4);
        let mut solver = BranchAndBound::new(&g, SearchConfig::default());
        solver.set_primal(vec![5, 6]).unwrap();
        let outcome = solver.minimize().unwrap();
        assert!(outcome.is_exact);
        assert_eq!(Some(2), outcome.best_value);
        assert_eq!(0, solver.statistics().improvements);
    }

    #[test]
    fn a_suboptimal_primal_is_improved() {
        let g = Graph::queens(4);
        let mut solver = BranchAndBound::new(&g, SearchConfig::default());
        solver.set_primal((0..16).collect()).unwrap();
        let outcome = solver.minimize().unwrap();
        assert_eq!(Some(2), outcome.best_value);
        assert!(solver.statistics().improvements >= 1);
    }
}
