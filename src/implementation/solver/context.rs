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

//! This module provides the search context: the explicit state of one
//! depth-first branch-and-bound search. It owns the partial solution, the
//! candidate accountant which drives the branching, the bound strategy and
//! the undo trail.
//!
//! Every mutation of the partial solution is recorded on the trail. A scope
//! remembers the height of the trail when it is entered and rewinds it to
//! that height when it is left, whatever the way it is left (normal return,
//! early break or error). This is what guarantees that every excluded vertex
//! is given back its candidate status and every placed vertex is removed in
//! the reverse order of the changes.

use tracing::debug;

use crate::{BoundStrategy, Branching, CandidateAccountant, Cutoff, Error, Graph, PartialSolution, Reason, SearchConfig, SearchStatistics};

/// One reversible change to the partial solution
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Change {
    /// The vertex lost its candidate status
    Excluded(usize),
    /// The vertex was placed in the partial solution
    Placed(usize),
}

/// What is left of a search once it is over
#[derive(Debug, Clone)]
pub(crate) struct SearchOutcome {
    pub best: Option<Vec<usize>>,
    pub abort: Option<Reason>,
    pub stats: SearchStatistics,
}

pub(crate) struct SearchContext<'a, B: BoundStrategy> {
    graph: &'a Graph,
    config: &'a SearchConfig,
    cutoff: &'a dyn Cutoff,

    state: PartialSolution,
    candidates: CandidateAccountant,
    bound: B,
    trail: Vec<Change>,

    /// The best dominating set known so far
    best: Option<Vec<usize>>,
    /// Only sets strictly smaller than this are of interest
    best_size: usize,
    /// Set once a dominating set fitting the size cap has been found
    satisfied: bool,
    abort: Option<Reason>,
    stats: SearchStatistics,
}

impl<'a, B: BoundStrategy> SearchContext<'a, B> {
    pub fn new(
        graph: &'a Graph,
        config: &'a SearchConfig,
        cutoff: &'a dyn Cutoff,
        bound: B,
        incumbent: Option<Vec<usize>>,
    ) -> Result<Self, Error> {
        let best_size = incumbent.as_ref().map_or(graph.nb_vertices() + 1, |s| s.len());
        Ok(SearchContext {
            graph,
            config,
            cutoff,
            state: PartialSolution::new(graph.nb_vertices()),
            candidates: CandidateAccountant::new(graph)?,
            bound,
            trail: vec![],
            best: incumbent,
            best_size,
            satisfied: false,
            abort: None,
            stats: SearchStatistics::default(),
        })
    }

    /// Runs the search to its end (or until it is interrupted)
    pub fn run(mut self) -> Result<SearchOutcome, Error> {
        self.verify()?;
        self.search()?;
        Ok(SearchOutcome { best: self.best, abort: self.abort, stats: self.stats })
    }

    /// The largest size of a dominating set that may be reported
    fn cap(&self) -> usize {
        self.config.gamma.unwrap_or(usize::MAX)
    }
    /// The largest size of a dominating set the search is still interested in
    fn target(&self) -> usize {
        self.cap().min(self.best_size.saturating_sub(1))
    }
    fn must_unwind(&self) -> bool {
        self.satisfied || self.abort.is_some()
    }

    fn search(&mut self) -> Result<(), Error> {
        self.stats.calls += 1;
        if self.must_unwind() {
            return Ok(());
        }
        if self.cutoff.must_stop() {
            self.abort = Some(Reason::CutoffOccurred);
            return Ok(());
        }

        let placed = self.state.nb_placed();
        if self.state.is_complete() {
            if placed < self.best_size && placed <= self.cap() {
                self.record();
            }
            return Ok(());
        }

        let target = self.target();
        let lb = placed.saturating_add(self.bound.estimate_remaining(&self.state, target));
        if lb >= self.best_size || lb > self.cap() {
            self.stats.prunes += 1;
            self.stats.shallowest_prune = Some(self.stats.shallowest_prune.map_or(placed, |d| d.min(placed)));
            return Ok(());
        }

        let Some(v) = self.branching_vertex() else {
            return Ok(());
        };
        let options = self.graph.closed_neighborhood(v).iter()
            .copied()
            .filter(|u| self.state.is_candidate(*u))
            .collect::<Vec<_>>();

        self.scoped(|ctx| {
            for u in options {
                if ctx.must_unwind() {
                    break;
                }
                ctx.exclude(u)?;
                ctx.scoped(|ctx| {
                    ctx.place(u)?;
                    ctx.search()
                })?;
                if ctx.is_stranded(u) {
                    break;
                }
            }
            Ok(())
        })
    }

    fn record(&mut self) {
        let solution = self.state.placed().collect::<Vec<_>>();
        debug!(size = solution.len(), calls = self.stats.calls, "new incumbent");
        self.best_size = solution.len();
        self.best = Some(solution);
        self.stats.improvements += 1;
        if self.config.gamma.is_some() {
            self.satisfied = true;
        }
    }

    fn branching_vertex(&self) -> Option<usize> {
        match self.config.branching {
            Branching::MostCandidates => self.candidates.max_undominated(),
            Branching::FewestCandidates => self.candidates.min_undominated(),
        }
    }

    /// Returns true iff some undominated vertex next to `u` has no candidate
    /// left around it. Candidates are only ever removed further along the
    /// loop that excluded `u`, so none of its remaining iterations can lead
    /// to a dominating set.
    fn is_stranded(&self, u: usize) -> bool {
        self.graph.closed_neighborhood(u).iter()
            .any(|x| !self.state.is_dominated(*x) && self.candidates.candidate_degree(*x) == 0)
    }

    // --- scoped undo ---------------------------------------------------------
    fn scoped<F>(&mut self, f: F) -> Result<(), Error>
    where F: FnOnce(&mut Self) -> Result<(), Error>
    {
        let mark = self.trail.len();
        let outcome = f(self);
        let rewound = self.rewind(mark);
        outcome.and(rewound)
    }

    fn rewind(&mut self, mark: usize) -> Result<(), Error> {
        while self.trail.len() > mark {
            match self.trail.pop() {
                Some(Change::Excluded(u)) => self.restore(u)?,
                Some(Change::Placed(u)) => self.unplace(u)?,
                None => break,
            }
        }
        Ok(())
    }

    // --- mutations -----------------------------------------------------------
    fn exclude(&mut self, u: usize) -> Result<(), Error> {
        if !self.state.remove_candidate(u) {
            return Err(Error::TrailMismatch(u));
        }
        for &x in self.graph.closed_neighborhood(u) {
            self.candidates.decrement(x)?;
        }
        self.bound.on_exclude(&self.state, u)?;
        self.trail.push(Change::Excluded(u));
        self.verify()
    }

    fn restore(&mut self, u: usize) -> Result<(), Error> {
        if !self.state.add_candidate(u) {
            return Err(Error::TrailMismatch(u));
        }
        for &x in self.graph.closed_neighborhood(u).iter().rev() {
            self.candidates.increment(x)?;
        }
        self.bound.on_restore(&self.state, u)?;
        self.verify()
    }

    fn place(&mut self, u: usize) -> Result<(), Error> {
        if !self.state.place(u) {
            return Err(Error::TrailMismatch(u));
        }
        for &w in self.graph.closed_neighborhood(u) {
            if self.state.cover_up(w) {
                self.candidates.dominate(w)?;
                self.bound.on_dominate(&self.state, w)?;
            }
        }
        self.bound.on_place(&self.state, u)?;
        self.trail.push(Change::Placed(u));
        self.verify()
    }

    fn unplace(&mut self, u: usize) -> Result<(), Error> {
        if !self.state.unplace(u) {
            return Err(Error::TrailMismatch(u));
        }
        for &w in self.graph.closed_neighborhood(u).iter().rev() {
            match self.state.cover_down(w) {
                None => return Err(Error::TrailMismatch(w)),
                Some(true) => {
                    self.candidates.undominate(w)?;
                    self.bound.on_undominate(&self.state, w)?;
                }
                Some(false) => {}
            }
        }
        self.bound.on_unplace(&self.state, u)?;
        self.verify()
    }

    fn verify(&self) -> Result<(), Error> {
        if self.config.check_invariants {
            self.candidates.check(self.graph, &self.state)?;
            self.bound.check_consistency(&self.state)?;
        }
        Ok(())
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_search_context {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use crate::{BoundStrategy, CandidateAccountant, DominationAccountant, Error, Graph, IncrementalBound, NoCutoff, PartialSolution, RecomputationBound, SearchConfig, SearchConfigBuilder};

    use super::{Change, SearchContext};

    fn checked() -> SearchConfig {
        SearchConfigBuilder::default().check_invariants(true).build().unwrap()
    }

    fn random_graph(rng: &mut ChaCha8Rng, n: usize, density: f64) -> Graph {
        let mut edges = vec![];
        for u in 0..n {
            for v in u + 1..n {
                if rng.gen_bool(density) {
                    edges.push((u, v));
                }
            }
        }
        Graph::from_edges(n, &edges).unwrap()
    }

    fn snapshot(ctx: &SearchContext<IncrementalBound>) -> (PartialSolution, CandidateAccountant, DominationAccountant) {
        (ctx.state.clone(), ctx.candidates.clone(), ctx.bound.accountant().clone())
    }

    #[test]
    fn placing_a_vertex_dominates_its_closed_neighborhood() {
        let g = Graph::queens(3);
        let config = checked();
        let mut ctx = SearchContext::new(&g, &config, &NoCutoff, IncrementalBound::new(&g).unwrap(), None).unwrap();
        ctx.exclude(4).unwrap();
        ctx.place(4).unwrap();
        assert!(ctx.state.is_complete());
        assert_eq!(None, ctx.candidates.max_undominated());
        assert_eq!(vec![Change::Excluded(4), Change::Placed(4)], ctx.trail);
    }

    #[test]
    fn rewinding_restores_the_exact_state() {
        let g = Graph::queens(4);
        let config = checked();
        let mut ctx = SearchContext::new(&g, &config, &NoCutoff, IncrementalBound::new(&g).unwrap(), None).unwrap();
        let before = snapshot(&ctx);
        ctx.scoped(|ctx| {
            ctx.exclude(0)?;
            ctx.exclude(5)?;
            ctx.place(5)?;
            ctx.exclude(10)?;
            ctx.place(10)
        }).unwrap();
        assert!(ctx.trail.is_empty());
        assert_eq!(before, snapshot(&ctx));
    }

    #[test]
    fn sibling_branches_see_the_same_branching_order() {
        let g = Graph::queens(4);
        let config = checked();
        let mut ctx = SearchContext::new(&g, &config, &NoCutoff, IncrementalBound::new(&g).unwrap(), None).unwrap();
        let before = ctx.candidates.clone();
        let lists = |acc: &CandidateAccountant| (0..=g.max_degree())
            .map(|d| acc.undominated_of_degree(d).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        assert_eq!(Some(5), ctx.candidates.max_undominated());

        ctx.scoped(|ctx| {
            ctx.exclude(5)?;
            ctx.place(5)
        }).unwrap();
        assert_eq!(Some(5), ctx.candidates.max_undominated());
        assert_eq!(lists(&before), lists(&ctx.candidates));
        assert_eq!(before, ctx.candidates);
    }

    #[test]
    fn a_failing_scope_is_rewound_too() {
        let g = Graph::queens(3);
        let config = checked();
        let mut ctx = SearchContext::new(&g, &config, &NoCutoff, IncrementalBound::new(&g).unwrap(), None).unwrap();
        let before = snapshot(&ctx);
        let outcome = ctx.scoped(|ctx| {
            ctx.exclude(1)?;
            ctx.place(1)?;
            // placing the same vertex twice is a bug
            ctx.place(1)
        });
        assert_eq!(Err(Error::TrailMismatch(1)), outcome);
        assert_eq!(before, snapshot(&ctx));
    }

    #[test]
    fn random_walks_are_undone_exactly() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let config = checked();
        for _ in 0..30 {
            let n = rng.gen_range(1..=12);
            let g = random_graph(&mut rng, n, 0.3);
            let mut ctx = SearchContext::new(&g, &config, &NoCutoff, IncrementalBound::new(&g).unwrap(), None).unwrap();
            let before = snapshot(&ctx);
            let steps = rng.gen_range(0..=n);
            let picks = (0..steps).map(|_| (rng.gen_range(0..n), rng.gen_bool(0.5))).collect::<Vec<_>>();
            ctx.scoped(|ctx| {
                for (u, keep) in picks {
                    if ctx.state.is_candidate(u) {
                        ctx.exclude(u)?;
                        if keep {
                            ctx.place(u)?;
                        }
                    }
                }
                Ok(())
            }).unwrap();
            assert_eq!(before, snapshot(&ctx));
        }
    }

    #[test]
    fn a_stranded_vertex_ends_the_branch() {
        // path 0 - 1 - 2: once 0 and 1 are excluded, nothing can cover 0
        let g = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let config = checked();
        let mut ctx = SearchContext::new(&g, &config, &NoCutoff, RecomputationBound::new(&g), None).unwrap();
        ctx.exclude(0).unwrap();
        assert!(!ctx.is_stranded(0));
        ctx.exclude(1).unwrap();
        assert!(ctx.is_stranded(1));
        ctx.rewind(0).unwrap();
        assert!(!ctx.is_stranded(1));
    }

    #[test]
    fn the_search_finds_a_minimum_on_a_small_board() {
        let g = Graph::queens(4);
        let config = checked();
        let ctx = SearchContext::new(&g, &config, &NoCutoff, IncrementalBound::new(&g).unwrap(), None).unwrap();
        let outcome = ctx.run().unwrap();
        let best = outcome.best.unwrap();
        assert_eq!(2, best.len());
        assert!(g.is_dominating(&best));
        assert!(outcome.abort.is_none());
        assert!(outcome.stats.calls > 0);
    }

    /// The least number of candidates covering every undominated vertex (if
    /// that is possible at all)
    fn min_extension(g: &Graph, state: &PartialSolution) -> Option<usize> {
        let candidates = state.candidates().iter().collect::<Vec<_>>();
        let undominated = state.undominated().collect::<Vec<_>>();
        let mut best = None;
        for mask in 0u32..(1 << candidates.len()) {
            let size = mask.count_ones() as usize;
            if best.map_or(false, |b| size >= b) {
                continue;
            }
            let covered = undominated.iter().all(|&u| {
                candidates.iter().enumerate()
                    .any(|(i, &c)| mask & (1 << i) != 0 && (c == u || g.are_adjacent(c, u)))
            });
            if covered {
                best = Some(size);
            }
        }
        best
    }

    /// Walks randomly down the search space, checking at every step that the
    /// bound never overestimates what is left to place.
    fn assert_admissible<B: BoundStrategy>(g: &Graph, config: &SearchConfig, bound: B, rng: &mut ChaCha8Rng) {
        let n = g.nb_vertices();
        let mut ctx = SearchContext::new(g, config, &NoCutoff, bound, None).unwrap();
        let picks = (0..n).map(|_| (rng.gen_range(0..n), rng.gen_bool(0.4))).collect::<Vec<_>>();
        for (u, keep) in picks {
            if let Some(needed) = min_extension(g, &ctx.state) {
                let estimate = ctx.bound.estimate_remaining(&ctx.state, n);
                assert!(estimate <= needed, "{estimate} > {needed} on {g:?}");
            }
            if ctx.state.is_candidate(u) {
                ctx.exclude(u).unwrap();
                if keep {
                    ctx.place(u).unwrap();
                }
            }
        }
    }

    #[test]
    fn the_bounds_never_overestimate_along_random_walks() {
        let mut rng = ChaCha8Rng::seed_from_u64(2020);
        let config = checked();
        for _ in 0..40 {
            let n = rng.gen_range(1..=10);
            let g = random_graph(&mut rng, n, 0.35);
            assert_admissible(&g, &config, IncrementalBound::new(&g).unwrap(), &mut rng);
            assert_admissible(&g, &config, RecomputationBound::new(&g), &mut rng);
        }
    }
}
