use std::cell::{Cell, Ref, RefCell, RefMut};

use crate::{entry::Entry, Comparator, Error, OrdComparator, Result};

/// Ordered map backed by one contiguous vec, sorted by key at all times.
///
/// Lookups are a binary search, inserts and removals shift the tail of the vec.
/// Every method takes `&self`: comparators and value finalizers are allowed to
/// reach the same map again (for example through a `Weak` handle), and the map
/// stays consistent when they do.
///
/// * no borrow of the storage is held while the comparator runs or while a
///   key or value is dropped
/// * `clear` and drop detach the storage first, so code running in a value's
///   `Drop` observes an empty map
/// * a search invalidated by reentrant mutation fails with [`Error::Modified`]
///
/// The map is `!Sync`; it is meant for one thread.
///
/// # Example
/// ```rust
/// use sorted_map::{Error, SortedMap};
///
/// let map = SortedMap::new();
/// for k in [5, 1, 3] {
///     map.insert(k, k * 10).unwrap();
/// }
///
/// assert_eq!(map.keys(), vec![1, 3, 5]);
/// assert_eq!(map.items(), vec![(1, 10), (3, 30), (5, 50)]);
/// assert_eq!(map.get(&3), Ok(30));
/// assert_eq!(map.pop(&1), Ok(10));
/// assert_eq!(map.keys(), vec![3, 5]);
/// assert_eq!(map.get_or(&9, -1), Ok(-1));
/// assert_eq!(map.remove(&9), Err(Error::KeyNotFound));
/// ```
pub struct SortedMap<K, V, C = OrdComparator> {
    entries: RefCell<Vec<Entry<K, V>>>,
    /// bumped on every mutation, lets a search notice it went stale
    generation: Cell<u64>,
    comparator: C,
}

impl<K, V> Default for SortedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> SortedMap<K, V> {
    /// Create an empty map ordered by `K: Ord`
    ///
    /// # Examples
    /// ```rust
    /// use sorted_map::SortedMap;
    ///
    /// let map = SortedMap::<i32, i32>::new();
    ///
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_comparator(OrdComparator)
    }

    /// Create an empty map with room for `capacity` entries
    ///
    /// # Examples
    /// ```rust
    /// use sorted_map::SortedMap;
    ///
    /// let map = SortedMap::<i32, i32>::with_capacity(16);
    ///
    /// assert!(map.capacity() >= 16);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, OrdComparator)
    }
}

impl<K, V, C> SortedMap<K, V, C> {
    /// Create an empty map ordered by `comparator`
    #[inline]
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_capacity_and_comparator(0, comparator)
    }

    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            entries: RefCell::new(Vec::with_capacity(capacity)),
            generation: Cell::new(0),
            comparator,
        }
    }

    /// Returns the comparator the map was created with
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns item count in the map
    #[inline]
    pub fn len(&self) -> usize {
        self.storage().len()
    }

    /// Returns true if the map contains no item
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release every entry.
    ///
    /// The storage is swapped out before any key or value is dropped, so a
    /// finalizer that looks at this map sees it empty, and may even insert
    /// into it.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_map::SortedMap;
    ///
    /// let map = SortedMap::new();
    /// map.insert(1, "a").unwrap();
    /// map.clear().unwrap();
    ///
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&self) -> Result<()> {
        let detached = std::mem::take(&mut *self.entries_mut()?);
        self.bump();

        tracing::trace!(released = detached.len(), "detached entries on clear");
        drop(detached);
        Ok(())
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation.get()
    }

    fn bump(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }

    /// Shared view of the storage. Mutable borrows never span foreign code,
    /// so this cannot conflict.
    pub(crate) fn storage(&self) -> Ref<'_, Vec<Entry<K, V>>> {
        self.entries.borrow()
    }

    pub(crate) fn entries(&self) -> Result<Ref<'_, Vec<Entry<K, V>>>> {
        self.entries.try_borrow().map_err(|_| Error::Busy)
    }

    pub(crate) fn entries_mut(&self) -> Result<RefMut<'_, Vec<Entry<K, V>>>> {
        self.entries.try_borrow_mut().map_err(|_| Error::Busy)
    }
}

impl<K: Clone, V, C> SortedMap<K, V, C> {
    /// Clone of the key at `index`, or `None` past the end
    pub(crate) fn key_at(&self, index: usize) -> Result<Option<K>> {
        Ok(self.entries()?.get(index).map(|e| e.key().clone()))
    }

    /// Snapshot of all keys in ascending order
    ///
    /// # Examples
    /// ```rust
    /// use sorted_map::SortedMap;
    ///
    /// let map = SortedMap::new();
    /// map.insert(2, "b").unwrap();
    /// map.insert(1, "a").unwrap();
    ///
    /// assert_eq!(map.keys(), vec![1, 2]);
    /// ```
    pub fn keys(&self) -> Vec<K> {
        self.storage().iter().map(|e| e.key().clone()).collect()
    }
}

impl<K, V: Clone, C> SortedMap<K, V, C> {
    /// Snapshot of all values, ordered by their keys
    pub fn values(&self) -> Vec<V> {
        self.storage().iter().map(|e| e.value().clone()).collect()
    }
}

impl<K: Clone, V: Clone, C> SortedMap<K, V, C> {
    /// Snapshot of all `(key, value)` pairs in ascending key order
    pub fn items(&self) -> Vec<(K, V)> {
        self.storage().iter().map(Entry::to_pair).collect()
    }

    /// Returns an iterator over a snapshot of the map. Later mutation of the
    /// map does not affect it.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_map::SortedMap;
    ///
    /// let map = SortedMap::new();
    /// map.insert(1, 2).unwrap();
    /// map.insert(2, 3).unwrap();
    ///
    /// let mut iter = map.iter();
    /// map.clear().unwrap();
    ///
    /// assert_eq!(iter.next(), Some((1, 2)));
    /// assert_eq!(iter.next(), Some((2, 3)));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> std::vec::IntoIter<(K, V)> {
        self.items().into_iter()
    }
}

impl<K: Clone, V, C: Comparator<K>> SortedMap<K, V, C> {
    /// Insert a key-value pair into the map.
    ///
    /// An existing equal key keeps its identity and only the value is
    /// rebound; the displaced value is handed back so it is released by the
    /// caller, outside the map.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_map::SortedMap;
    ///
    /// let map = SortedMap::new();
    /// assert_eq!(map.insert(1, "a").unwrap(), None);
    /// assert_eq!(map.insert(1, "b").unwrap(), Some("a"));
    ///
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&self, key: K, value: V) -> Result<Option<V>> {
        let hit = self.search(&key)?;

        let mut entries = self.entries_mut()?;
        let prev = if hit.found {
            match entries.get_mut(hit.index) {
                Some(entry) => Some(entry.replace_value(value)),
                None => return Err(Error::Modified),
            }
        } else {
            entries.insert(hit.index, Entry::new(key, value));
            None
        };
        drop(entries);
        self.bump();

        Ok(prev)
    }

    /// Returns true if the map holds `key`
    ///
    /// # Examples
    /// ```rust
    /// use sorted_map::SortedMap;
    ///
    /// let map = SortedMap::new();
    /// map.insert(1, ()).unwrap();
    ///
    /// assert_eq!(map.contains_key(&1), Ok(true));
    /// assert_eq!(map.contains_key(&2), Ok(false));
    /// ```
    pub fn contains_key(&self, key: &K) -> Result<bool> {
        Ok(self.search(key)?.found)
    }

    /// Removes `key` from the map.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_map::{Error, SortedMap};
    ///
    /// let map = SortedMap::new();
    /// map.insert(1, 2).unwrap();
    ///
    /// assert!(map.remove(&1).is_ok());
    /// assert_eq!(map.remove(&1), Err(Error::KeyNotFound));
    /// ```
    pub fn remove(&self, key: &K) -> Result<()> {
        let entry = self.take(key)?.ok_or(Error::KeyNotFound)?;
        drop(entry);
        Ok(())
    }

    /// Removes `key` and returns its value
    pub fn pop(&self, key: &K) -> Result<V> {
        self.take(key)?
            .map(Entry::into_value)
            .ok_or(Error::KeyNotFound)
    }

    /// Removes `key` and returns its value, or returns `default` when the key
    /// is absent. The map is left unchanged in that case.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_map::SortedMap;
    ///
    /// let map = SortedMap::new();
    /// map.insert(1, 10).unwrap();
    ///
    /// assert_eq!(map.pop_or(&1, -1), Ok(10));
    /// assert_eq!(map.pop_or(&1, -1), Ok(-1));
    /// assert!(map.is_empty());
    /// ```
    pub fn pop_or(&self, key: &K, default: V) -> Result<V> {
        Ok(self.take(key)?.map_or(default, Entry::into_value))
    }

    /// Insert every pair of `iter`, stopping at the first error. Pairs already
    /// inserted stay in the map.
    pub fn try_extend<I>(&self, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in iter {
            self.insert(k, v)?;
        }
        Ok(())
    }

    /// Detach the entry for `key`. The returned entry is dropped by the caller
    /// once the storage borrow is gone.
    fn take(&self, key: &K) -> Result<Option<Entry<K, V>>> {
        let hit = self.search(key)?;
        if !hit.found {
            return Ok(None);
        }

        let mut entries = self.entries_mut()?;
        if hit.index >= entries.len() {
            return Err(Error::Modified);
        }
        let entry = entries.remove(hit.index);
        drop(entries);
        self.bump();

        Ok(Some(entry))
    }
}

impl<K: Clone, V: Clone, C: Comparator<K>> SortedMap<K, V, C> {
    /// Returns a clone of the value for `key`.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_map::{Error, SortedMap};
    ///
    /// let map = SortedMap::new();
    /// map.insert(1, 2).unwrap();
    ///
    /// assert_eq!(map.get(&1), Ok(2));
    /// assert_eq!(map.get(&2), Err(Error::KeyNotFound));
    /// ```
    pub fn get(&self, key: &K) -> Result<V> {
        self.lookup(key)?.ok_or(Error::KeyNotFound)
    }

    /// Returns a clone of the value for `key`, or `default` when absent
    pub fn get_or(&self, key: &K, default: V) -> Result<V> {
        Ok(self.lookup(key)?.unwrap_or(default))
    }

    fn lookup(&self, key: &K) -> Result<Option<V>> {
        let hit = self.search(key)?;
        if !hit.found {
            return Ok(None);
        }
        Ok(self.entries()?.get(hit.index).map(|e| e.value().clone()))
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for SortedMap<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            entries: RefCell::new(self.entries.borrow().clone()),
            generation: Cell::new(0),
            comparator: self.comparator.clone(),
        }
    }
}

impl<K, V, C> Drop for SortedMap<K, V, C> {
    fn drop(&mut self) {
        // same discipline as `clear`: storage is empty before any entry drops
        let detached = std::mem::take(self.entries.get_mut());
        if !detached.is_empty() {
            tracing::trace!(released = detached.len(), "detached entries on drop");
        }
        drop(detached);
    }
}
