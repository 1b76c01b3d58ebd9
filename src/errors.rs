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

//! This module defines the error type shared by all the components of the
//! crate. Errors fall into two families: the *malformed input* family, which
//! is detected before any search starts, and the *invariant violation*
//! family, which denotes a bug in the engine or in one of the accountants
//! and must abort the search since the incremental state can no longer be
//! trusted.

use crate::SearchConfigBuilderError;

/// The error type of the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    // -- malformed input -----------------------------------------------------
    /// A vertex lists itself among its neighbors.
    #[error("vertex {0} is its own neighbor")]
    SelfLoop(usize),
    /// A vertex lists a neighbor which does not exist.
    #[error("vertex {vertex} has neighbor {neighbor} but the graph only has {nb_vertices} vertices")]
    OutOfRange { vertex: usize, neighbor: usize, nb_vertices: usize },
    /// The adjacency relation is not symmetric.
    #[error("{from} lists {to} as a neighbor but {to} does not list {from}")]
    Asymmetric { from: usize, to: usize },
    /// A neighbor appears more than once in the same adjacency list.
    #[error("vertex {vertex} lists neighbor {neighbor} more than once")]
    DuplicateNeighbor { vertex: usize, neighbor: usize },
    /// The row/column refinement was requested for a graph which is not an
    /// `n x n` board.
    #[error("a {board}x{board} board needs {} vertices, the graph has {nb_vertices}", .board * .board)]
    BoardMismatch { board: usize, nb_vertices: usize },
    /// The solution given as primal mentions a vertex which does not exist.
    #[error("vertex {vertex} does not exist, the graph has {nb_vertices} vertices")]
    UnknownVertex { vertex: usize, nb_vertices: usize },
    /// The solution given as primal does not dominate the graph.
    #[error("the given primal solution does not dominate vertex {0}")]
    NotDominating(usize),
    /// The search configuration could not be built.
    #[error("invalid configuration: {0}")]
    Config(String),

    // -- invariant violations -------------------------------------------------
    /// Attempt to move a member below degree zero.
    #[error("cannot move member {member} below degree 0")]
    BucketUnderflow { member: usize },
    /// Attempt to move a member past the largest degree.
    #[error("cannot move member {member} above the maximum degree {max_degree}")]
    BucketOverflow { member: usize, max_degree: usize },
    /// The degree ring no longer links exactly the non-empty buckets in
    /// ascending order.
    #[error("the degree ring is corrupted around bucket {0}")]
    CorruptRing(usize),
    /// An accountant disagrees with a full recomputation.
    #[error("{what} of vertex {vertex} is {found}, expected {expected}")]
    Inconsistent { what: &'static str, vertex: usize, expected: usize, found: usize },
    /// The undo trail does not match the state it is meant to restore.
    #[error("undo trail mismatch on vertex {0}")]
    TrailMismatch(usize),
}

impl From<SearchConfigBuilderError> for Error {
    fn from(e: SearchConfigBuilderError) -> Self {
        Error::Config(e.to_string())
    }
}

impl Error {
    /// Returns true iff this error denotes a bug in the search engine or in one
    /// of its accountants (as opposed to an invalid input).
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self,
            Error::BucketUnderflow { .. }
            | Error::BucketOverflow { .. }
            | Error::CorruptRing(_)
            | Error::Inconsistent { .. }
            | Error::TrailMismatch(_))
    }
}

#[cfg(test)]
mod test_errors {
    use crate::Error;

    #[test]
    fn bucket_errors_are_invariant_violations() {
        assert!(Error::BucketUnderflow { member: 3 }.is_invariant_violation());
        assert!(Error::BucketOverflow { member: 3, max_degree: 4 }.is_invariant_violation());
        assert!(Error::TrailMismatch(1).is_invariant_violation());
    }
    #[test]
    fn malformed_graphs_are_not_invariant_violations() {
        assert!(!Error::SelfLoop(2).is_invariant_violation());
        assert!(!Error::Asymmetric { from: 0, to: 1 }.is_invariant_violation());
    }
    #[test]
    fn board_mismatch_reports_the_expected_size() {
        let err = Error::BoardMismatch { board: 3, nb_vertices: 8 };
        assert_eq!("a 3x3 board needs 9 vertices, the graph has 8", err.to_string());
    }
}
