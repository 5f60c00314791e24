//! Fixed-size subset enumeration
//!
//! Implements Algorithm T from Knuth, TAOCP Vol. 4A, 7.2.1.3 ("lexicographic
//! combinations"), which visits every t-combination of {0, ..., n-1} with an
//! amortized constant number of steps between successive combinations.

use crate::error::ClusterError;
use std::iter::FusedIterator;

/// Lazy iterator over all t-combinations of {0, ..., n-1}
///
/// Combinations are yielded in colexicographic order, each one as an
/// ascending index vector.
#[derive(Debug, Clone)]
pub struct Combinations {
    t: usize,

    /// c[1..=t] hold the current combination, c[t+1] = n and c[t+2] = 0 are
    /// sentinels. c[0] is unused so indices match the algorithm's notation.
    c: Vec<usize>,

    j: usize,

    /// t == n: a single combination, no walk needed
    whole: bool,

    done: bool,
}

/// Generate every size-`t` subset of `{0, ..., n-1}`
pub fn generate(t: usize, n: usize) -> Result<Combinations, ClusterError> {
    if t > n || n < 1 || t < 1 {
        return Err(ClusterError::invalid_argument(format!(
            "need 1 <= t <= n for t-combinations of n, got t: {}, n: {}",
            t, n
        )));
    }

    let mut c = vec![0; t + 3];
    for j in 1..=t {
        c[j] = j - 1;
    }
    c[t + 1] = n;
    c[t + 2] = 0;

    Ok(Combinations {
        t,
        c,
        j: t,
        whole: t == n,
        done: false,
    })
}

impl Combinations {
    /// Step from the combination just visited to the next one (T2 to T6)
    fn advance(&mut self) {
        if self.whole {
            self.done = true;
            return;
        }

        let c = &mut self.c;
        let x = if self.j > 0 {
            self.j
        } else {
            // T3: easy case
            if c[1] + 1 < c[2] {
                c[1] += 1;
                return;
            }
            self.j = 2;

            // T4: find j
            let x = loop {
                c[self.j - 1] = self.j - 2;
                let x = c[self.j] + 1;
                if x != c[self.j + 1] {
                    break x;
                }
                self.j += 1;
            };

            // T5: done?
            if self.j > self.t {
                self.done = true;
                return;
            }
            x
        };

        // T6: increase c[j]
        c[self.j] = x;
        self.j -= 1;
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let combination = self.c[1..=self.t].to_vec();
        self.advance();
        Some(combination)
    }
}

impl FusedIterator for Combinations {}

/// All subsets of `items` with sizes in `[min_size, max_size]`
///
/// Sizes are produced in ascending order and each subset keeps the relative
/// order of `items`. An empty range (`min_size > max_size`) yields nothing.
pub fn all_subsets_in_range<T: Clone>(
    min_size: usize,
    max_size: usize,
    items: &[T],
) -> Result<Vec<Vec<T>>, ClusterError> {
    let mut subsets = Vec::new();

    for size in min_size..=max_size {
        for indices in generate(size, items.len())? {
            subsets.push(indices.into_iter().map(|i| items[i].clone()).collect());
        }
    }

    Ok(subsets)
}
