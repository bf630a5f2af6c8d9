/// One stored `(key, value)` pair. The key is never touched after insertion,
/// rebinding only swaps the value.
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    #[inline]
    pub(crate) fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    /// Replace the value, returning the previous one. The caller decides when
    /// the old value is released.
    #[inline]
    pub(crate) fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    #[inline]
    pub(crate) fn into_value(self) -> V {
        self.value
    }

    #[inline]
    pub(crate) fn to_pair(&self) -> (K, V)
    where
        K: Clone,
        V: Clone,
    {
        (self.key.clone(), self.value.clone())
    }
}
