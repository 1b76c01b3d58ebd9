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

//! This module provides the candidate accountant which drives the branching.
//! For every vertex, it tracks how many candidates are left in its closed
//! neighborhood (that is, in how many ways it can still be dominated) and it
//! keeps the undominated vertices chained per degree so that the most (or
//! least) constrained undominated vertex can be found without scanning the
//! graph.

use crate::{DegreeBuckets, Error, Graph, PartialSolution};

/// Marks a vertex which is currently not chained in any list
const NIL: usize = usize::MAX;

/// Tracks the candidate degree of every vertex: the number of candidates in
/// its closed neighborhood. On top of the degree buckets, each bucket chains
/// its undominated members in a doubly linked list. Dominated vertices are
/// still tracked (their degree keeps moving) but are not chained.
///
/// The lists live in one flat arena: node `v < n` is vertex `v` and node
/// `n + d` is the sentinel of the list of degree `d`.
///
/// Degree decreases and dominations move forward; degree increases and
/// undominations undo them and must come in the exact reverse order. Each
/// forward move records the neighbors a vertex was unchained from, so that
/// undoing it chains the vertex back at the very same position: after any
/// sequence of moves followed by their undo, the accountant is equal to what
/// it was before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateAccountant {
    buckets: DegreeBuckets,
    dominated: Vec<bool>,
    /// Per degree: how many undominated vertices have that candidate degree
    undominated_count: Vec<usize>,
    next: Vec<usize>,
    prev: Vec<usize>,
    /// The `(prev, next)` neighbors of the vertices unchained by a forward move
    displaced: Vec<(usize, usize)>,
}

impl CandidateAccountant {
    /// Initializes the accountant at the root of the search: every vertex is a
    /// candidate and nothing is dominated.
    pub fn new(graph: &Graph) -> Result<Self, Error> {
        let n = graph.nb_vertices();
        let max_degree = graph.max_degree();
        let degrees = (0..n)
            .map(|v| graph.closed_neighborhood(v).len())
            .collect::<Vec<_>>();

        let nodes = n + max_degree + 1;
        let mut me = CandidateAccountant {
            buckets: DegreeBuckets::new(max_degree, degrees)?,
            dominated: vec![false; n],
            undominated_count: vec![0; max_degree + 1],
            next: vec![NIL; nodes],
            prev: vec![NIL; nodes],
            displaced: vec![],
        };
        for d in 0..=max_degree {
            let s = me.head(d);
            me.next[s] = s;
            me.prev[s] = s;
        }
        for v in 0..n {
            me.push_back(v, me.buckets.degree(v));
        }
        Ok(me)
    }

    #[inline]
    pub fn candidate_degree(&self, v: usize) -> usize {
        self.buckets.degree(v)
    }
    /// The number of undominated vertices whose candidate degree is `d`
    #[inline]
    pub fn undominated_count(&self, d: usize) -> usize {
        self.undominated_count[d]
    }

    /// One more vertex of the closed neighborhood of `v` is a candidate again.
    /// This undoes the latest pending `decrement`.
    pub fn increment(&mut self, v: usize) -> Result<(), Error> {
        let (old, new) = self.buckets.move_up(v)?;
        if !self.dominated[v] {
            self.unlink(v, old);
            self.replace(v, new)?;
        }
        Ok(())
    }
    /// One less vertex of the closed neighborhood of `v` is a candidate
    pub fn decrement(&mut self, v: usize) -> Result<(), Error> {
        let (old, new) = self.buckets.move_down(v)?;
        if !self.dominated[v] {
            self.displace(v, old);
            self.push_back(v, new);
        }
        Ok(())
    }
    /// `v` has just become dominated
    pub fn dominate(&mut self, v: usize) -> Result<(), Error> {
        if self.dominated[v] {
            return Err(Error::TrailMismatch(v));
        }
        self.dominated[v] = true;
        self.displace(v, self.buckets.degree(v));
        Ok(())
    }
    /// `v` is no longer dominated. This undoes the latest pending `dominate`.
    pub fn undominate(&mut self, v: usize) -> Result<(), Error> {
        if !self.dominated[v] {
            return Err(Error::TrailMismatch(v));
        }
        self.replace(v, self.buckets.degree(v))?;
        self.dominated[v] = false;
        Ok(())
    }

    /// An undominated vertex having the largest candidate degree (if any).
    pub fn max_undominated(&self) -> Option<usize> {
        self.buckets.descending()
            .find(|d| self.undominated_count[*d] > 0)
            .map(|d| self.next[self.head(d)])
    }
    /// An undominated vertex having the smallest candidate degree (if any).
    pub fn min_undominated(&self) -> Option<usize> {
        self.buckets.ascending()
            .find(|d| self.undominated_count[*d] > 0)
            .map(|d| self.next[self.head(d)])
    }

    /// The undominated vertices whose candidate degree is `d`, in list order
    pub fn undominated_of_degree(&self, d: usize) -> impl Iterator<Item = usize> + '_ {
        let head = self.head(d);
        std::iter::successors(Some(self.next[head]), move |v| Some(self.next[*v]))
            .take_while(move |v| *v != head)
    }

    /// Compares the accountant against a full recomputation from the given
    /// partial solution.
    pub fn check(&self, graph: &Graph, state: &PartialSolution) -> Result<(), Error> {
        self.buckets.check()?;
        let mut undominated_count = vec![0; self.undominated_count.len()];
        for v in 0..graph.nb_vertices() {
            let expected = graph.closed_neighborhood(v).iter()
                .filter(|u| state.is_candidate(**u))
                .count();
            let found = self.buckets.degree(v);
            if expected != found {
                return Err(Error::Inconsistent { what: "candidate degree", vertex: v, expected, found });
            }
            if self.dominated[v] != state.is_dominated(v) {
                return Err(Error::Inconsistent {
                    what: "domination flag", vertex: v,
                    expected: state.is_dominated(v) as usize,
                    found: self.dominated[v] as usize,
                });
            }
            if !self.dominated[v] {
                undominated_count[found] += 1;
            }
        }
        for d in 0..=self.buckets.max_degree() {
            let head = self.head(d);
            let mut cur = head;
            let mut len = 0;
            loop {
                let nxt = self.next[cur];
                if nxt == NIL || self.prev[nxt] != cur {
                    return Err(Error::CorruptRing(d));
                }
                if nxt == head {
                    break;
                }
                if self.dominated[nxt] || self.buckets.degree(nxt) != d {
                    return Err(Error::Inconsistent {
                        what: "list of degree", vertex: nxt,
                        expected: d, found: self.buckets.degree(nxt),
                    });
                }
                len += 1;
                cur = nxt;
            }
            if len != undominated_count[d] || len != self.undominated_count[d] {
                return Err(Error::Inconsistent {
                    what: "undominated count of degree", vertex: d,
                    expected: undominated_count[d], found: self.undominated_count[d],
                });
            }
        }
        Ok(())
    }

    #[inline]
    fn head(&self, d: usize) -> usize {
        self.dominated.len() + d
    }
    fn push_back(&mut self, v: usize, d: usize) {
        let head = self.head(d);
        let last = self.prev[head];
        self.link(last, v, head, d);
    }
    fn link(&mut self, before: usize, v: usize, after: usize, d: usize) {
        self.prev[v] = before;
        self.next[v] = after;
        self.next[before] = v;
        self.prev[after] = v;
        self.undominated_count[d] += 1;
    }
    fn unlink(&mut self, v: usize, d: usize) {
        let (before, after) = (self.prev[v], self.next[v]);
        self.next[before] = after;
        self.prev[after] = before;
        self.next[v] = NIL;
        self.prev[v] = NIL;
        self.undominated_count[d] -= 1;
    }
    /// Unchains `v` from the list of degree `d` and remembers where it was
    fn displace(&mut self, v: usize, d: usize) {
        self.displaced.push((self.prev[v], self.next[v]));
        self.unlink(v, d);
    }
    /// Chains `v` back into the list of degree `d` at the position recorded
    /// by the matching `displace`
    fn replace(&mut self, v: usize, d: usize) -> Result<(), Error> {
        let Some(&(before, after)) = self.displaced.last() else {
            return Err(Error::TrailMismatch(v));
        };
        let adjacent = self.next[before] == after && self.prev[after] == before;
        if !adjacent || !self.is_chained_in(before, d) || !self.is_chained_in(after, d) {
            return Err(Error::TrailMismatch(v));
        }
        self.displaced.pop();
        self.link(before, v, after, d);
        Ok(())
    }
    /// Returns true iff `node` is the sentinel or a member of the list of
    /// degree `d`
    fn is_chained_in(&self, node: usize, d: usize) -> bool {
        if node == self.head(d) {
            true
        } else {
            node < self.dominated.len()
                && !self.dominated[node]
                && self.next[node] != NIL
                && self.buckets.degree(node) == d
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
