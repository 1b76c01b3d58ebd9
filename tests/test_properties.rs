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

//! Randomized checks of the solver against an exhaustive enumeration of all
//! the vertex subsets of small graphs.

use domset::{BoundKind, BoundStrategy, BranchAndBound, Branching, Graph, IncrementalBound, PartialSolution, RecomputationBound, SearchConfig, SearchConfigBuilder, Solver};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_graph(rng: &mut ChaCha8Rng) -> Graph {
    let n = rng.gen_range(1..=12);
    let density = rng.gen_range(0.05..0.6);
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

/// The domination number of the graph, by enumeration of all subsets
fn brute_force_minimum(graph: &Graph) -> usize {
    let n = graph.nb_vertices();
    let mut best = n;
    for mask in 0u32..(1 << n) {
        let size = mask.count_ones() as usize;
        if size >= best {
            continue;
        }
        let set = (0..n).filter(|v| mask & (1 << v) != 0).collect::<Vec<_>>();
        if graph.is_dominating(&set) {
            best = size;
        }
    }
    best
}

fn config(gamma: Option<usize>, bound: BoundKind, branching: Branching) -> SearchConfig {
    let mut builder = SearchConfigBuilder::default();
    builder.bound(bound).branching(branching).check_invariants(true);
    if let Some(g) = gamma {
        builder.gamma(g);
    }
    builder.build().unwrap()
}

const VARIANTS: [(BoundKind, Branching); 4] = [
    (BoundKind::Incremental, Branching::MostCandidates),
    (BoundKind::Incremental, Branching::FewestCandidates),
    (BoundKind::Recompute, Branching::MostCandidates),
    (BoundKind::Recompute, Branching::FewestCandidates),
];

#[test]
fn the_minimum_matches_an_exhaustive_enumeration() {
    let mut rng = ChaCha8Rng::seed_from_u64(20201);
    for _ in 0..60 {
        let g = random_graph(&mut rng);
        let expected = brute_force_minimum(&g);
        for (bound, branching) in VARIANTS {
            let mut solver = BranchAndBound::new(&g, config(None, bound, branching));
            let outcome = solver.minimize().unwrap();
            assert!(outcome.is_exact);
            assert_eq!(Some(expected), outcome.best_value, "{g:?}");
            assert!(g.is_dominating(&solver.best_solution().unwrap()));
        }
    }
}

#[test]
fn the_decision_problem_agrees_with_the_domination_number() {
    let mut rng = ChaCha8Rng::seed_from_u64(1337);
    for _ in 0..60 {
        let g = random_graph(&mut rng);
        let gamma = brute_force_minimum(&g);
        for (bound, branching) in VARIANTS {
            let mut solver = BranchAndBound::new(&g, config(Some(gamma), bound, branching));
            assert!(solver.minimize().unwrap().found(), "{g:?}");
            let solution = solver.best_solution().unwrap();
            assert!(solution.len() <= gamma);
            assert!(g.is_dominating(&solution));

            if gamma > 0 {
                let mut solver = BranchAndBound::new(&g, config(Some(gamma - 1), bound, branching));
                assert!(!solver.minimize().unwrap().found(), "{g:?}");
            }
        }
    }
}

/// Sparse graphs, several of which need more vertices than their largest
/// closed neighborhood has members
fn sparse_graphs() -> Vec<Graph> {
    vec![
        Graph::from_edges(4, &[(0, 1), (2, 3)]).unwrap(),
        Graph::from_edges(6, &[(0, 1), (2, 3), (4, 5)]).unwrap(),
        Graph::from_edges(8, &[(0, 1), (2, 3), (4, 5), (6, 7)]).unwrap(),
        Graph::from_adjacency(vec![vec![]; 1]).unwrap(),
        Graph::from_adjacency(vec![vec![]; 2]).unwrap(),
        Graph::from_adjacency(vec![vec![]; 3]).unwrap(),
        Graph::from_edges(3, &[(0, 1)]).unwrap(),
        Graph::from_edges(5, &[(0, 1), (2, 3)]).unwrap(),
        Graph::from_edges(7, &[(0, 1), (1, 2), (3, 4), (4, 5)]).unwrap(),
    ]
}

#[test]
fn sparse_graphs_are_solved_exactly_whatever_the_bound() {
    for g in sparse_graphs() {
        let gamma = brute_force_minimum(&g);
        for (bound, branching) in VARIANTS {
            let mut solver = BranchAndBound::new(&g, config(None, bound, branching));
            let outcome = solver.minimize().unwrap();
            assert_eq!(Some(gamma), outcome.best_value, "{bound:?} on {g:?}");
            assert!(g.is_dominating(&solver.best_solution().unwrap()));

            let mut solver = BranchAndBound::new(&g, config(Some(gamma), bound, branching));
            assert!(solver.minimize().unwrap().found(), "{bound:?} on {g:?}");
            let mut solver = BranchAndBound::new(&g, config(Some(gamma - 1), bound, branching));
            assert!(!solver.minimize().unwrap().found(), "{bound:?} on {g:?}");
        }

        let root = PartialSolution::new(g.nb_vertices());
        let n = g.nb_vertices();
        assert!(IncrementalBound::new(&g).unwrap().estimate_remaining(&root, n) <= gamma, "{g:?}");
        assert!(RecomputationBound::new(&g).estimate_remaining(&root, n) <= gamma, "{g:?}");
    }
}

#[test]
fn the_root_estimates_never_exceed_the_domination_number() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..100 {
        let g = random_graph(&mut rng);
        let gamma = brute_force_minimum(&g);
        let root = PartialSolution::new(g.nb_vertices());
        let n = g.nb_vertices();

        let mut incremental = IncrementalBound::new(&g).unwrap();
        let mut recompute = RecomputationBound::new(&g);
        assert!(incremental.estimate_remaining(&root, n) <= gamma, "{g:?}");
        assert!(recompute.estimate_remaining(&root, n) <= gamma, "{g:?}");
    }
}
