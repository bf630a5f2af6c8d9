//! Positional-argument accessors for dynamic hosts where keys and values are
//! one handle type. `get`/`pop` take the key and an optional default.

use crate::{Comparator, Error, Result, SortedMap};

fn arity_error(name: &str, got: usize) -> Error {
    if got > 2 {
        Error::Usage(format!("{name}() expected at most 2 arguments, got {got}"))
    } else {
        Error::Usage(format!("{name}() expected at least 1 argument, got {got}"))
    }
}

impl<T: Clone, C: Comparator<T>> SortedMap<T, T, C> {
    /// `get(key)` or `get(key, default)`
    ///
    /// # Examples
    /// ```rust
    /// use sorted_map::{Error, SortedMap};
    ///
    /// let map = SortedMap::new();
    /// map.insert(1, 10).unwrap();
    ///
    /// assert_eq!(map.get_varargs(&[1]), Ok(10));
    /// assert_eq!(map.get_varargs(&[2, -1]), Ok(-1));
    /// assert_eq!(
    ///     map.get_varargs(&[1, 2, 3]),
    ///     Err(Error::Usage("get() expected at most 2 arguments, got 3".into()))
    /// );
    /// ```
    pub fn get_varargs(&self, args: &[T]) -> Result<T> {
        match args {
            [key] => self.get(key),
            [key, default] => self.get_or(key, default.clone()),
            _ => Err(arity_error("get", args.len())),
        }
    }

    /// `pop(key)` or `pop(key, default)`. Both forms remove the entry when it
    /// is present.
    pub fn pop_varargs(&self, args: &[T]) -> Result<T> {
        match args {
            [key] => self.pop(key),
            [key, default] => self.pop_or(key, default.clone()),
            _ => Err(arity_error("pop", args.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> SortedMap<i64, i64> {
        let map = SortedMap::new();
        map.try_extend([(1, 10), (3, 30)]).unwrap();
        map
    }

    #[test]
    fn test_get_varargs() {
        let map = map();
        assert_eq!(map.get_varargs(&[3]), Ok(30));
        assert_eq!(map.get_varargs(&[2]), Err(Error::KeyNotFound));
        assert_eq!(map.get_varargs(&[2, 0]), Ok(0));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_pop_varargs_removes_in_both_forms() {
        let map = map();
        assert_eq!(map.pop_varargs(&[1, -1]), Ok(10));
        assert_eq!(map.pop_varargs(&[1, -1]), Ok(-1));
        assert_eq!(map.pop_varargs(&[3]), Ok(30));
        assert_eq!(map.pop_varargs(&[3]), Err(Error::KeyNotFound));
        assert!(map.is_empty());
    }

    #[test]
    fn test_arity() {
        let map = map();
        assert_eq!(
            map.get_varargs(&[]),
            Err(Error::Usage("get() expected at least 1 argument, got 0".into()))
        );
        assert_eq!(
            map.pop_varargs(&[1, 2, 3, 4]),
            Err(Error::Usage("pop() expected at most 2 arguments, got 4".into()))
        );
        // usage errors leave the map alone
        assert_eq!(map.keys(), vec![1, 3]);
    }
}
