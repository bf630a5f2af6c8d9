use std::rc::Rc;

use crate::ComparisonError;

/// Ordering policy for keys of a [`SortedMap`](crate::SortedMap).
///
/// Only "less than" is supplied; equality is derived from it. The predicate may
/// be impure: it can allocate, fail, or even call back into the map it orders.
pub trait Comparator<K> {
    /// Returns whether `lhs` sorts strictly before `rhs`.
    fn less(&self, lhs: &K, rhs: &K) -> Result<bool, ComparisonError>;

    /// Identity fast path, checked before `less` when testing equality.
    /// `true` means the two keys are the same object and therefore equal.
    #[inline]
    fn same(&self, _lhs: &K, _rhs: &K) -> bool {
        false
    }
}

/// Orders keys by their `Ord` impl. Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrdComparator;

impl<K: Ord> Comparator<K> for OrdComparator {
    #[inline]
    fn less(&self, lhs: &K, rhs: &K) -> Result<bool, ComparisonError> {
        Ok(lhs.lt(rhs))
    }
}

/// Orders keys with a user supplied closure.
///
/// # Examples
/// ```rust
/// use sorted_map::{ComparisonError, FnComparator, SortedMap};
///
/// // reverse order, and refuse to order NaN
/// let cmp = FnComparator::new(|a: &f64, b: &f64| {
///     if a.is_nan() || b.is_nan() {
///         return Err(ComparisonError::new("NaN"));
///     }
///     Ok(a > b)
/// });
/// let map = SortedMap::with_comparator(cmp);
/// map.insert(1.0, "one").unwrap();
/// map.insert(2.0, "two").unwrap();
///
/// assert_eq!(map.keys(), vec![2.0, 1.0]);
/// assert!(map.insert(f64::NAN, "nan").is_err());
/// ```
#[derive(Clone)]
pub struct FnComparator<F>(F);

impl<F> FnComparator<F> {
    pub fn new<K>(f: F) -> Self
    where
        F: Fn(&K, &K) -> Result<bool, ComparisonError>,
    {
        Self(f)
    }
}

impl<K, F> Comparator<K> for FnComparator<F>
where
    F: Fn(&K, &K) -> Result<bool, ComparisonError>,
{
    #[inline]
    fn less(&self, lhs: &K, rhs: &K) -> Result<bool, ComparisonError> {
        (self.0)(lhs, rhs)
    }
}

impl<F> std::fmt::Debug for FnComparator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnComparator")
    }
}

/// Adapter for `Rc` keys: two handles to the same allocation are equal
/// without consulting the inner comparator.
///
/// # Examples
/// ```rust
/// use std::rc::Rc;
/// use sorted_map::{Identity, OrdComparator, SortedMap};
///
/// let map = SortedMap::with_comparator(Identity::new(OrdComparator));
/// let key = Rc::new(String::from("k"));
/// map.insert(key.clone(), 1).unwrap();
///
/// assert_eq!(map.get(&key).unwrap(), 1);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity<C>(C);

impl<C> Identity<C> {
    pub fn new(inner: C) -> Self {
        Self(inner)
    }

    pub fn inner(&self) -> &C {
        &self.0
    }
}

impl<T, C: Comparator<Rc<T>>> Comparator<Rc<T>> for Identity<C> {
    #[inline]
    fn less(&self, lhs: &Rc<T>, rhs: &Rc<T>) -> Result<bool, ComparisonError> {
        if Rc::ptr_eq(lhs, rhs) {
            return Ok(false);
        }
        self.0.less(lhs, rhs)
    }

    #[inline]
    fn same(&self, lhs: &Rc<T>, rhs: &Rc<T>) -> bool {
        Rc::ptr_eq(lhs, rhs) || self.0.same(lhs, rhs)
    }
}
