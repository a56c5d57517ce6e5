//! Fixed-size subset enumeration.
//!
//! `Combinations` yields every size-`k` subset of `n` items, in lexicographic
//! order of input positions. The sequence is finite, deterministic and
//! restartable (`reset`, or clone before iterating), and its length is always
//! `binomial(n, k)`.
//!
//! Shared by hand scoring (fifteens) and the discard advisor (keep/discard
//! splits). Inputs never exceed a handful of cards, so exhaustive enumeration
//! is fine.
//!
//! ```
//! use cribbage_engine::subsets::{binomial, Combinations};
//!
//! let items = [1, 2, 3, 4];
//! let pairs: Vec<_> = Combinations::new(&items, 2).unwrap().collect();
//! assert_eq!(pairs.len(), binomial(4, 2));
//! assert_eq!(pairs[0].as_slice(), &[1, 2]);
//! assert_eq!(pairs[5].as_slice(), &[3, 4]);
//! ```

use smallvec::SmallVec;

use crate::core::{EngineError, Result};

/// Inline capacity of a yielded subset.
pub const INLINE_SUBSET: usize = 6;

pub type Subset<T> = SmallVec<[T; INLINE_SUBSET]>;

/// `n` choose `k`; zero when `k > n`.
#[must_use]
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

/// Iterator over the size-`k` subsets of a slice.
#[derive(Clone, Debug)]
pub struct Combinations<'a, T> {
    items: &'a [T],
    indices: SmallVec<[usize; INLINE_SUBSET]>,
    remaining: usize,
}

impl<'a, T: Copy> Combinations<'a, T> {
    /// Fails with `InvalidArity` when `k < 1` or `k > items.len()`.
    pub fn new(items: &'a [T], k: usize) -> Result<Self> {
        let n = items.len();
        if k < 1 || k > n {
            return Err(EngineError::InvalidArity { n, k });
        }
        Ok(Self {
            items,
            indices: (0..k).collect(),
            remaining: binomial(n, k),
        })
    }

    /// Rewind to the first subset.
    pub fn reset(&mut self) {
        let k = self.indices.len();
        for (slot, i) in self.indices.iter_mut().zip(0..k) {
            *slot = i;
        }
        self.remaining = binomial(self.items.len(), k);
    }

    fn advance(&mut self) {
        let n = self.items.len();
        let k = self.indices.len();
        // rightmost index that can still move
        let Some(pivot) = (0..k).rev().find(|&i| self.indices[i] < n - k + i) else {
            return;
        };
        self.indices[pivot] += 1;
        for i in pivot + 1..k {
            self.indices[i] = self.indices[i - 1] + 1;
        }
    }
}

impl<T: Copy> Iterator for Combinations<'_, T> {
    type Item = Subset<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let subset = self.indices.iter().map(|&i| self.items[i]).collect();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(subset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Copy> ExactSizeIterator for Combinations<'_, T> {}
