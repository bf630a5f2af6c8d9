use std::fmt;

use crate::{entry::Entry, Result, SortedMap};

impl<K, V, C> SortedMap<K, V, C> {
    /// Visit every key and value the map owns, in key order, without taking
    /// new shares of them. Meant for reference tracing (cycle detection,
    /// liveness checks).
    ///
    /// The storage stays borrowed while `visit` runs, so any attempt to mutate
    /// the map from inside it fails with [`Error::Busy`](crate::Error::Busy).
    ///
    /// # Examples
    /// ```rust
    /// use sorted_map::SortedMap;
    ///
    /// let map = SortedMap::new();
    /// map.insert(2, "b").unwrap();
    /// map.insert(1, "a").unwrap();
    ///
    /// let mut seen = vec![];
    /// map.traverse(|k, v| seen.push((*k, *v))).unwrap();
    /// assert_eq!(seen, vec![(1, "a"), (2, "b")]);
    /// ```
    pub fn traverse(&self, mut visit: impl FnMut(&K, &V)) -> Result<()> {
        let entries = self.entries()?;
        for entry in entries.iter() {
            visit(entry.key(), entry.value());
        }
        Ok(())
    }

    /// Number of entries the storage can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.storage().capacity()
    }

    /// Approximate bytes used by the map itself, excluding whatever keys and
    /// values point to.
    pub fn footprint(&self) -> usize {
        std::mem::size_of::<Self>() + self.capacity() * std::mem::size_of::<Entry<K, V>>()
    }

    /// Reserve room for at least `additional` more entries
    pub fn reserve(&self, additional: usize) -> Result<()> {
        self.entries_mut()?.reserve(additional);
        Ok(())
    }

    pub fn shrink_to_fit(&self) -> Result<()> {
        self.entries_mut()?.shrink_to_fit();
        Ok(())
    }
}

// Formatting goes through a snapshot so user `Display`/`Debug` code is free
// to touch the map.

impl<K, V, C> fmt::Display for SortedMap<K, V, C>
where
    K: Clone + fmt::Display,
    V: Clone + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sortedmap({")?;
        for (i, (k, v)) in self.items().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("})")
    }
}

impl<K, V, C> fmt::Debug for SortedMap<K, V, C>
where
    K: Clone + fmt::Debug,
    V: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = self.items();
        f.debug_map()
            .entries(items.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}
