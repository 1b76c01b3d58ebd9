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

//! This module defines the `Solver` trait.

use crate::{Completion, Error, SearchStatistics};

/// A solution is the list of vertices forming a dominating set, sorted by
/// increasing index.
pub type Solution = Vec<usize>;

/// This is the solver abstraction. It is implemented by a structure that
/// explores the space of dominating sets of a graph to find the smallest one
/// (or the first one that fits a given size cap).
pub trait Solver {
    /// This method orders the solver to search for the smallest dominating
    /// set. It returns a structure standing for the outcome of the attempted
    /// minimization. Such a `Completion` may either be marked **exact** if the
    /// search has been carried out until its natural end. Or it can be
    /// inexact, in which case it means that the search was stopped because of
    /// the satisfaction of some cutoff criterion.
    ///
    /// Along with the `is_exact` flag, the completion provides an optional
    /// `best_value`. Four cases are thus to be distinguished:
    ///
    /// * When the `is_exact` flag is true, and a `best_value` is present: the
    ///   `best_value` is the size of a minimum dominating set (or, when a size
    ///   cap is configured, the size of a dominating set fitting the cap).
    /// * When the `is_exact` flag is false and a `best_value` is present, it
    ///   is the size of the best dominating set known at the time of cutoff.
    /// * When the `is_exact` flag is true, and no `best_value` is present: it
    ///   means that no dominating set fits the size cap.
    /// * When the `is_exact` flag is false and no `best_value` is present: it
    ///   simply means that nothing was found before the cutoff occurred.
    ///
    /// An error is only ever returned when an internal invariant is violated,
    /// in which case the search is aborted.
    fn minimize(&mut self) -> Result<Completion, Error>;
    /// The size of the best dominating set that has been found (if any)
    fn best_value(&self) -> Option<usize>;
    /// The best dominating set that has been found (if any)
    fn best_solution(&self) -> Option<Solution>;
    /// Sets a primal solution: a dominating set known beforehand. The search
    /// will then only look for strictly smaller sets. An error is returned
    /// when the given set does not dominate the graph.
    fn set_primal(&mut self, solution: Solution) -> Result<(), Error>;
    /// The counters describing the effort spent by the last search
    fn statistics(&self) -> SearchStatistics;
}
