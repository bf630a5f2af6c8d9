use crate::{Comparator, Error, Result, SortedMap};

/// Result of one key search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Hit {
    /// lower bound: first slot whose key is not less than the searched key
    pub index: usize,
    /// whether the key at `index` equals the searched key
    pub found: bool,
}

impl<K: Clone, V, C: Comparator<K>> SortedMap<K, V, C> {
    /// Lower bound search followed by an equality test at the bound.
    ///
    /// The comparator is foreign code and may reach back into this map, so no
    /// borrow is held while it runs: each probe key is cloned out under a short
    /// borrow and every index is checked against the live length. If the map
    /// changed while searching, the search is void and `Error::Modified` is
    /// returned.
    pub(crate) fn search(&self, key: &K) -> Result<Hit> {
        let generation = self.generation();
        let index = self.lower_bound(key, generation)?;

        let found = match self.key_at(index)? {
            Some(probe) => {
                // lower bound already ruled out `probe < key`
                self.comparator().same(&probe, key) || !self.comparator().less(key, &probe)?
            }
            None => false,
        };
        self.ensure_generation(generation)?;

        Ok(Hit { index, found })
    }

    fn lower_bound(&self, key: &K, generation: u64) -> Result<usize> {
        let mut lo = 0;
        let mut hi = self.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let probe = self.key_at(mid)?.ok_or(Error::Modified)?;

            let is_less = self.comparator().less(&probe, key)?;
            self.ensure_generation(generation)?;

            if is_less {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        Ok(lo)
    }

    fn ensure_generation(&self, generation: u64) -> Result<()> {
        if self.generation() != generation {
            tracing::debug!("key search invalidated by reentrant mutation");
            return Err(Error::Modified);
        }
        Ok(())
    }
}
