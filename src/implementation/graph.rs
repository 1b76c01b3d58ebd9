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

//! This module provides the immutable graph the search works on. A graph is
//! built once, validated, and then shared (by reference) by every component
//! of the solver for the whole duration of a search.

use crate::Error;

/// A finite simple graph over the vertices `0..nb_vertices()`.
///
/// The graph stores the *closed* neighborhood of every vertex (the vertex
/// itself along with all its neighbors) sorted by increasing index, since
/// this is what domination reasons about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    closed: Vec<Vec<usize>>,
    max_degree: usize,
}

impl Graph {
    /// Creates a graph from its adjacency lists: `adjacency[v]` lists the
    /// (open) neighbors of `v`. The adjacency relation must be symmetric and
    /// free of self loops, out of range indices and duplicates; otherwise a
    /// configuration error is returned.
    pub fn from_adjacency(adjacency: Vec<Vec<usize>>) -> Result<Self, Error> {
        let n = adjacency.len();
        let mut closed = Vec::with_capacity(n);
        for (v, neighbors) in adjacency.iter().enumerate() {
            let mut nbh = Vec::with_capacity(neighbors.len() + 1);
            nbh.push(v);
            for &u in neighbors.iter() {
                if u == v {
                    return Err(Error::SelfLoop(v));
                }
                if u >= n {
                    return Err(Error::OutOfRange { vertex: v, neighbor: u, nb_vertices: n });
                }
                nbh.push(u);
            }
            nbh.sort_unstable();
            if let Some(w) = nbh.windows(2).find(|w| w[0] == w[1]) {
                return Err(Error::DuplicateNeighbor { vertex: v, neighbor: w[0] });
            }
            closed.push(nbh);
        }
        for (v, nbh) in closed.iter().enumerate() {
            for &u in nbh.iter() {
                if closed[u].binary_search(&v).is_err() {
                    return Err(Error::Asymmetric { from: v, to: u });
                }
            }
        }
        let max_degree = closed.iter().map(|nbh| nbh.len()).max().unwrap_or(0);
        Ok(Graph { closed, max_degree })
    }

    /// Creates a graph with `nb_vertices` vertices from a list of undirected
    /// edges. Repeated edges are merged; self loops and out of range
    /// endpoints are rejected.
    pub fn from_edges(nb_vertices: usize, edges: &[(usize, usize)]) -> Result<Self, Error> {
        let mut adjacency = vec![vec![]; nb_vertices];
        for &(u, v) in edges {
            if u == v {
                return Err(Error::SelfLoop(u));
            }
            if u >= nb_vertices || v >= nb_vertices {
                let (vertex, neighbor) = if u >= nb_vertices { (v, u) } else { (u, v) };
                return Err(Error::OutOfRange { vertex, neighbor, nb_vertices });
            }
            adjacency[u].push(v);
            adjacency[v].push(u);
        }
        for list in adjacency.iter_mut() {
            list.sort_unstable();
            list.dedup();
        }
        Self::from_adjacency(adjacency)
    }

    /// Builds the queen graph of an `n x n` board: square `r * n + c` is
    /// adjacent to every other square a chess queen standing on it attacks
    /// (same row, same column or same diagonal).
    pub fn queens(n: usize) -> Self {
        let nn = n * n;
        let mut closed = Vec::with_capacity(nn);
        for i in 0..nn {
            let (r, c) = (i / n, i % n);
            let nbh = (0..nn)
                .filter(|&j| {
                    let (rj, cj) = (j / n, j % n);
                    rj == r || cj == c || rj + c == r + cj || rj + cj == r + c
                })
                .collect::<Vec<_>>();
            closed.push(nbh);
        }
        let max_degree = closed.iter().map(|nbh| nbh.len()).max().unwrap_or(0);
        Graph { closed, max_degree }
    }

    #[inline]
    pub fn nb_vertices(&self) -> usize {
        self.closed.len()
    }
    /// Δ: the size of the largest closed neighborhood in the graph. This is
    /// the largest degree any of the accountants will ever have to track.
    #[inline]
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }
    /// The closed neighborhood of `v`, sorted by increasing index.
    #[inline]
    pub fn closed_neighborhood(&self, v: usize) -> &[usize] {
        &self.closed[v]
    }
    /// The (open) neighbors of `v`, sorted by increasing index.
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.closed[v].iter().copied().filter(move |&u| u != v)
    }
    /// Returns true iff `u` and `v` are distinct adjacent vertices.
    pub fn are_adjacent(&self, u: usize, v: usize) -> bool {
        u != v && self.closed[u].binary_search(&v).is_ok()
    }
    /// Returns the first vertex which is not dominated by `set`, if any.
    pub fn first_undominated(&self, set: &[usize]) -> Option<usize> {
        let mut dominated = vec![false; self.nb_vertices()];
        for &s in set {
            if s < self.nb_vertices() {
                for &v in self.closed[s].iter() {
                    dominated[v] = true;
                }
            }
        }
        dominated.iter().position(|d| !d)
    }
    /// Returns true iff every vertex is in `set` or adjacent to a member of `set`.
    pub fn is_dominating(&self, set: &[usize]) -> bool {
        self.first_undominated(set).is_none()
    }
}

/// Renders the given set of squares as an `n x n` board where each member of
/// the set is shown as a queen (`Q`) and every other square as `-`.
pub fn render_board(n: usize, squares: &[usize]) -> String {
    let mut out = String::with_capacity(n * (2 * n + 1));
    for r in 0..n {
        for c in 0..n {
            out.push(' ');
            out.push(if squares.contains(&(r * n + c)) { 'Q' } else { '-' });
        }
        out.push('\n');
    }
    out
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_graph {
    use crate::{Graph, Error, render_board};

    #[test]
    fn closed_neighborhood_contains_the_vertex_itself() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        assert_eq!(&[0, 1], g.closed_neighborhood(0));
        assert_eq!(&[0, 1, 2], g.closed_neighborhood(1));
        assert_eq!(vec![0, 2], g.neighbors(1).collect::<Vec<_>>());
        assert_eq!(3, g.max_degree());
    }

    #[test]
    fn self_loops_are_rejected() {
        assert_eq!(Err(Error::SelfLoop(1)), Graph::from_adjacency(vec![vec![], vec![1]]));
        assert_eq!(Err(Error::SelfLoop(0)), Graph::from_edges(2, &[(0, 0)]));
    }

    #[test]
    fn out_of_range_neighbors_are_rejected() {
        assert_eq!(
            Err(Error::OutOfRange { vertex: 0, neighbor: 5, nb_vertices: 2 }),
            Graph::from_adjacency(vec![vec![5], vec![]]));
    }

    #[test]
    fn asymmetric_adjacency_is_rejected() {
        assert_eq!(
            Err(Error::Asymmetric { from: 0, to: 1 }),
            Graph::from_adjacency(vec![vec![1], vec![]]));
    }

    #[test]
    fn duplicate_neighbors_are_rejected() {
        assert_eq!(
            Err(Error::DuplicateNeighbor { vertex: 0, neighbor: 1 }),
            Graph::from_adjacency(vec![vec![1, 1], vec![0]]));
    }

    #[test]
    fn repeated_edges_are_merged() {
        let g = Graph::from_edges(2, &[(0, 1), (1, 0), (0, 1)]).unwrap();
        assert_eq!(&[0, 1], g.closed_neighborhood(0));
    }

    #[test]
    fn the_centre_of_a_3x3_board_sees_everything() {
        let g = Graph::queens(3);
        assert_eq!(9, g.nb_vertices());
        assert_eq!(9, g.closed_neighborhood(4).len());
        assert_eq!(7, g.closed_neighborhood(0).len());
        assert_eq!(7, g.closed_neighborhood(1).len());
        assert!(!g.are_adjacent(1, 6));
    }

    #[test]
    fn the_queen_graph_is_symmetric() {
        let g = Graph::queens(5);
        let adjacency = (0..25).map(|v| g.neighbors(v).collect()).collect();
        assert_eq!(Ok(g.clone()), Graph::from_adjacency(adjacency));
        // the centre of a 5x5 board attacks 4 + 4 + 4 + 4 squares
        assert_eq!(17, g.max_degree());
    }

    #[test]
    fn is_dominating_checks_every_vertex() {
        let g = Graph::queens(4);
        assert!(g.is_dominating(&[0, 10]));
        assert!(g.is_dominating(&[5, 6]));
        assert!(!g.is_dominating(&[0]));
        assert_eq!(Some(6), g.first_undominated(&[0]));
        assert!(Graph::queens(3).is_dominating(&[4]));
    }

    #[test]
    fn the_empty_graph_is_dominated_by_the_empty_set() {
        let g = Graph::from_adjacency(vec![]).unwrap();
        assert_eq!(0, g.max_degree());
        assert!(g.is_dominating(&[]));
    }

    #[test]
    fn render_board_shows_the_queens() {
        assert_eq!(" - - -\n - Q -\n - - -\n", render_board(3, &[4]));
    }
}
