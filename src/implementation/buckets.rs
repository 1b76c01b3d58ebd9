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

//! This module provides the degree bucket list which both accountants are
//! built upon. It is a fixed array of buckets (one per degree in `0..=Δ`) in
//! which the non-empty buckets are chained into an ascending ring.
//!
//! All the links are plain indices in flat arrays: bucket `d` lives at index
//! `d` and the ring is closed by a sentinel which lives at index `Δ + 1`.
//! Because the degree of a member only ever changes by one unit at a time,
//! a bucket which becomes non-empty can always be spliced into the ring right
//! next to the bucket the member comes from, so the ring never needs to be
//! sorted.

use crate::Error;

/// Marks a bucket which is currently detached from the ring
const NIL: usize = usize::MAX;

/// Buckets of members indexed by their current degree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeBuckets {
    /// The current degree of each member
    degree: Vec<usize>,
    /// The number of members in each bucket (the sentinel slot is unused)
    count: Vec<usize>,
    /// Link to the next (higher) bucket in the ring
    next: Vec<usize>,
    /// Link to the previous (lower) bucket in the ring
    prev: Vec<usize>,
}

impl DegreeBuckets {
    /// Creates the bucket list of a population whose initial degrees are
    /// given by `degrees` (the i-th degree is that of member i). Buckets span
    /// the degrees `0..=max_degree`.
    pub fn new(max_degree: usize, degrees: Vec<usize>) -> Result<Self, Error> {
        let sentinel = max_degree + 1;
        let mut count = vec![0; max_degree + 2];
        for (member, &d) in degrees.iter().enumerate() {
            if d > max_degree {
                return Err(Error::BucketOverflow { member, max_degree });
            }
            count[d] += 1;
        }

        let mut next = vec![NIL; max_degree + 2];
        let mut prev = vec![NIL; max_degree + 2];
        let mut last = sentinel;
        for d in (0..=max_degree).filter(|d| count[*d] > 0) {
            next[last] = d;
            prev[d] = last;
            last = d;
        }
        next[last] = sentinel;
        prev[sentinel] = last;

        Ok(DegreeBuckets { degree: degrees, count, next, prev })
    }

    /// The largest degree a member may have
    #[inline]
    pub fn max_degree(&self) -> usize {
        self.sentinel() - 1
    }
    #[inline]
    fn sentinel(&self) -> usize {
        self.count.len() - 1
    }
    /// The current degree of `member`
    #[inline]
    pub fn degree(&self, member: usize) -> usize {
        self.degree[member]
    }
    /// The number of members whose degree is `d`
    #[inline]
    pub fn count(&self, d: usize) -> usize {
        self.count[d]
    }
    /// Returns true iff the bucket of degree `d` is part of the ring
    #[inline]
    pub fn is_linked(&self, d: usize) -> bool {
        self.next[d] != NIL
    }

    /// Moves `member` from the bucket of degree `d` to the one of degree `d+1`.
    /// Returns the pair `(d, d+1)`.
    pub fn move_up(&mut self, member: usize) -> Result<(usize, usize), Error> {
        let old = self.degree[member];
        if old >= self.max_degree() {
            return Err(Error::BucketOverflow { member, max_degree: self.max_degree() });
        }
        let new = old + 1;
        if self.count[new] == 0 {
            // splice `new` right after `old`
            let after = self.next[old];
            self.link(old, new, after);
        }
        self.transfer(member, old, new);
        Ok((old, new))
    }

    /// Moves `member` from the bucket of degree `d` to the one of degree `d-1`.
    /// Returns the pair `(d, d-1)`.
    pub fn move_down(&mut self, member: usize) -> Result<(usize, usize), Error> {
        let old = self.degree[member];
        if old == 0 {
            return Err(Error::BucketUnderflow { member });
        }
        let new = old - 1;
        if self.count[new] == 0 {
            // splice `new` right before `old`
            let before = self.prev[old];
            self.link(before, new, old);
        }
        self.transfer(member, old, new);
        Ok((old, new))
    }

    /// The highest non-empty degree (if any)
    #[inline]
    pub fn front_from_high(&self) -> Option<usize> {
        self.ring_node(self.prev[self.sentinel()])
    }
    /// The lowest non-empty degree (if any)
    #[inline]
    pub fn front_from_low(&self) -> Option<usize> {
        self.ring_node(self.next[self.sentinel()])
    }
    /// The non-empty degree immediately below `d` in the ring (if any).
    /// `d` must be linked.
    #[inline]
    pub fn lower(&self, d: usize) -> Option<usize> {
        self.ring_node(self.prev[d])
    }
    /// The non-empty degree immediately above `d` in the ring (if any).
    /// `d` must be linked.
    #[inline]
    pub fn higher(&self, d: usize) -> Option<usize> {
        self.ring_node(self.next[d])
    }
    /// Iterates over the non-empty degrees from the highest to the lowest
    pub fn descending(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.front_from_high(), move |d| self.lower(*d))
    }
    /// Iterates over the non-empty degrees from the lowest to the highest
    pub fn ascending(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.front_from_low(), move |d| self.higher(*d))
    }

    /// Checks that the ring links exactly the non-empty buckets in ascending
    /// order, that detached buckets carry no link and that the bucket counts
    /// agree with the member degrees.
    pub fn check(&self) -> Result<(), Error> {
        let mut count = vec![0; self.count.len()];
        for &d in self.degree.iter() {
            count[d] += 1;
        }
        if let Some(d) = (0..=self.max_degree()).find(|d| count[*d] != self.count[*d]) {
            return Err(Error::CorruptRing(d));
        }

        let sentinel = self.sentinel();
        let mut cur = sentinel;
        let mut expected = (0..=self.max_degree()).filter(|d| self.count[*d] > 0);
        loop {
            let nxt = self.next[cur];
            if nxt == NIL || self.prev[nxt] != cur {
                return Err(Error::CorruptRing(cur));
            }
            if nxt == sentinel {
                break;
            }
            if expected.next() != Some(nxt) {
                return Err(Error::CorruptRing(nxt));
            }
            cur = nxt;
        }
        if let Some(d) = expected.next() {
            return Err(Error::CorruptRing(d));
        }
        if let Some(d) = (0..=self.max_degree()).find(|d| self.count[*d] == 0 && (self.next[*d] != NIL || self.prev[*d] != NIL)) {
            return Err(Error::CorruptRing(d));
        }
        Ok(())
    }

    #[inline]
    fn ring_node(&self, d: usize) -> Option<usize> {
        if d == self.sentinel() || d == NIL { None } else { Some(d) }
    }
    #[inline]
    fn link(&mut self, before: usize, node: usize, after: usize) {
        self.prev[node] = before;
        self.next[node] = after;
        self.next[before] = node;
        self.prev[after] = node;
    }
    #[inline]
    fn unlink(&mut self, node: usize) {
        let (before, after) = (self.prev[node], self.next[node]);
        self.next[before] = after;
        self.prev[after] = before;
        self.next[node] = NIL;
        self.prev[node] = NIL;
    }
    #[inline]
    fn transfer(&mut self, member: usize, old: usize, new: usize) {
        self.degree[member] = new;
        self.count[old] -= 1;
        self.count[new] += 1;
        if self.count[old] == 0 {
            self.unlink(old);
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
