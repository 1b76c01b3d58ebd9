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

//! # DOMSET
//! DOMSET is an exact solver for the minimum dominating set problem: given a
//! graph, find a smallest set of vertices `D` such that every vertex either
//! belongs to `D` or is adjacent to a member of `D`. It is primarily used to
//! compute the queen domination number of chess boards (how many queens are
//! needed to attack or occupy every square), but it works on any simple
//! graph.
//!
//! ## How it works
//! The solver performs a depth-first branch and bound. At each node of the
//! search tree, it picks an undominated vertex and branches on the candidate
//! vertices of its closed neighborhood (one of them has to be placed). A
//! lower bound on the number of vertices still needed is computed at each
//! node and the node is pruned as soon as that bound shows it cannot lead to
//! a better (or small enough) dominating set.
//!
//! Two bounding techniques are available (see `BoundKind`):
//! * `Incremental` keeps degree buckets up to date as the partial solution
//!   evolves, so that the bound is obtained without ever scanning the graph;
//! * `Recompute` recomputes three bounds from scratch at every node and keeps
//!   the strongest. On queen graphs, it may be complemented by a row/column
//!   counting argument.
//!
//! ## Quick Example
//! The following finds a minimum dominating set of the 5x5 queen graph:
//! ```
//! use domset::*;
//!
//! let graph = Graph::queens(5);
//! let mut solver = BranchAndBound::new(&graph, SearchConfig::default());
//!
//! let outcome = solver.minimize().unwrap();
//! assert!(outcome.is_exact);
//! assert_eq!(Some(3), outcome.best_value);
//!
//! let queens = solver.best_solution().unwrap();
//! assert!(graph.is_dominating(&queens));
//! print!("{}", render_board(5, &queens));
//! ```
//!
//! ## Decision mode
//! When a size cap `gamma` is configured, the search stops as soon as it
//! finds a dominating set of at most `gamma` vertices. When no such set
//! exists, the outcome is not found (this is not an error):
//! ```
//! use domset::*;
//!
//! let graph  = Graph::queens(5);
//! let config = SearchConfigBuilder::default()
//!     .gamma(2)
//!     .bound(BoundKind::Recompute)
//!     .build()
//!     .unwrap();
//! let mut solver = BranchAndBound::new(&graph, config);
//! assert!(!solver.minimize().unwrap().found());
//! ```
//!
//! ## Going further
//! Searches can be interrupted with a `Cutoff` (e.g. `TimeBudget`), seeded
//! with a known dominating set through `Solver::set_primal` and inspected
//! through `Solver::statistics`. The `demos` folder of our repository holds a
//! command line front end which solves queen boards and graph files.

mod common;
mod errors;
mod abstraction;
mod implementation;

pub use common::*;
pub use errors::*;
pub use abstraction::*;
pub use implementation::*;
