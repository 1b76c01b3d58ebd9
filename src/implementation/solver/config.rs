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

//! This module defines the configuration of a search.

use derive_builder::Builder;

/// The lower bounding technique used to prune the search tree
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BoundKind {
    /// Degree buckets maintained along with the partial solution
    #[default]
    Incremental,
    /// Everything is recomputed from the partial solution at every node
    Recompute,
}

/// The rule used to pick the undominated vertex to branch upon
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Branching {
    /// Branch on an undominated vertex with the most candidates around it
    #[default]
    MostCandidates,
    /// Branch on an undominated vertex with the fewest candidates around it
    FewestCandidates,
}

/// This is how you configure a search, e.g.
/// ```
/// # use domset::*;
/// let config = SearchConfigBuilder::default()
///     .gamma(5)
///     .bound(BoundKind::Recompute)
///     .queen_board(8)
///     .build()
///     .unwrap();
/// assert_eq!(Some(5), config.gamma);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct SearchConfig {
    /// When present, the search stops as soon as it finds a dominating set
    /// of at most `gamma` vertices and never reports a larger one. When
    /// absent (default), the search looks for a minimum dominating set.
    #[builder(default, setter(strip_option))]
    pub gamma: Option<usize>,
    /// The lower bound used to prune the search tree
    #[builder(default)]
    pub bound: BoundKind,
    /// The rule used to select the vertex to branch upon
    #[builder(default)]
    pub branching: Branching,
    /// When present, the graph is the queen graph of a board of that size and
    /// the row/column refinement is enabled. This requires the `Recompute`
    /// bound.
    #[builder(default, setter(strip_option))]
    pub queen_board: Option<usize>,
    /// This flag must be true if you want every accountant to be compared
    /// against a full recomputation after each mutation (slow).
    #[builder(default = "false")]
    pub check_invariants: bool,
}

impl SearchConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        let bound = self.bound.unwrap_or_default();
        match self.queen_board.flatten() {
            Some(0) => Err("the queen board must have at least one square".to_string()),
            Some(_) if bound != BoundKind::Recompute =>
                Err("the row/column refinement requires the recompute bound".to_string()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod test_config {
    use crate::{BoundKind, Branching, Error, SearchConfig, SearchConfigBuilder};

    #[test]
    fn defaults_look_for_a_minimum_with_the_incremental_bound() {
        let config = SearchConfigBuilder::default().build().unwrap();
        assert_eq!(SearchConfig::default(), config);
        assert_eq!(None, config.gamma);
        assert_eq!(BoundKind::Incremental, config.bound);
        assert_eq!(Branching::MostCandidates, config.branching);
        assert!(!config.check_invariants);
    }

    #[test]
    fn queen_board_requires_the_recompute_bound() {
        let err = SearchConfigBuilder::default().queen_board(4).build().unwrap_err();
        assert!(matches!(Error::from(err), Error::Config(_)));
        assert!(SearchConfigBuilder::default()
            .queen_board(4)
            .bound(BoundKind::Recompute)
            .build()
            .is_ok());
    }

    #[test]
    fn an_empty_board_is_rejected() {
        assert!(SearchConfigBuilder::default()
            .queen_board(0)
            .bound(BoundKind::Recompute)
            .build()
            .is_err());
    }
}
