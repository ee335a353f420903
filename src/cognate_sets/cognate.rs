//! A single cell of a partition.
//!
//! See [`Cognate<T, S>`] for more information.
//!
//! [`Cognate<T, S>`]: struct.Cognate.html

use std::{
    ops,
    fmt,
    hash::{Hash, BuildHasher},
    iter::FromIterator,
    collections::{
        hash_map::RandomState,
        hash_set::{self, HashSet},
    },
};

/// A set of elements that belong together.
///
/// A `Cognate` is a thin wrapper around a `HashSet` and dereferences to it,
/// so every method of `HashSet` can be used on it.
/// Cloning a `Cognate` gives an independent copy that does not share anything with the original.
///
/// Inside a `CognateSet` two cognates are told apart by where they are stored and not by what
/// they contain. The `PartialEq` implementation of this type compares the contents and is meant
/// for cognates the caller owns.
///
/// # Examples
///
/// ```
/// use cognates::CognateSet;
///
/// let mut cognate_set = CognateSet::new();
/// cognate_set.join(vec!['a', 'b']);
///
/// let mut cognate = cognate_set.cognate(&'a');
/// assert!(cognate.contains(&'b'));
///
/// // This is our own copy so changing it does not change the `CognateSet`.
/// cognate.insert('z');
/// assert!(!cognate_set.contains(&'z'));
/// ```
#[derive(Clone)]
pub struct Cognate<T, S = RandomState> {
    set: HashSet<T, S>,
}

impl<T> Cognate<T, RandomState> {
    /// Creates an empty `Cognate`.
    #[inline]
    pub fn new() -> Self {
        Self {
            set: HashSet::new(),
        }
    }
}

impl<T, S> Cognate<T, S> {
    /// Creates an empty `Cognate` which will use the given hash builder.
    #[inline]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            set: HashSet::with_hasher(hash_builder),
        }
    }

    /// Consumes the `Cognate` and returns the underlying set.
    #[inline]
    pub fn into_set(self) -> HashSet<T, S> {
        self.set
    }
}

impl<T, S> Cognate<T, S> where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Moves every element of `other` into `self`.
    pub(crate) fn absorb(&mut self, other: Cognate<T, S>) {
        self.set.extend(other.set);
    }
}

impl<T> Default for Cognate<T, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> ops::Deref for Cognate<T, S> {
    type Target = HashSet<T, S>;

    fn deref(&self) -> &HashSet<T, S> {
        &self.set
    }
}

impl<T, S> ops::DerefMut for Cognate<T, S> {
    fn deref_mut(&mut self) -> &mut HashSet<T, S> {
        &mut self.set
    }
}

impl<T, S> fmt::Debug for Cognate<T, S> where T: fmt::Debug {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.debug_set().entries(self.set.iter()).finish()
    }
}

impl<T, S> PartialEq for Cognate<T, S> where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.set == other.set
    }
}

impl<T, S> Eq for Cognate<T, S> where
    T: Eq + Hash,
    S: BuildHasher,
{}

impl<T, S> From<HashSet<T, S>> for Cognate<T, S> {
    fn from(set: HashSet<T, S>) -> Self {
        Self { set }
    }
}

impl<T, S> From<Cognate<T, S>> for HashSet<T, S> {
    fn from(cognate: Cognate<T, S>) -> Self {
        cognate.set
    }
}

impl<T, S> FromIterator<T> for Cognate<T, S> where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I>(iter: I) -> Self where I: IntoIterator<Item = T> {
        Self {
            set: HashSet::from_iter(iter),
        }
    }
}

impl<T, S> Extend<T> for Cognate<T, S> where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I>(&mut self, iter: I) where I: IntoIterator<Item = T> {
        self.set.extend(iter);
    }
}

impl<T, S> IntoIterator for Cognate<T, S> {
    type Item = T;
    type IntoIter = hash_set::IntoIter<T>;

    fn into_iter(self) -> hash_set::IntoIter<T> {
        self.set.into_iter()
    }
}

impl<'a, T, S> IntoIterator for &'a Cognate<T, S> {
    type Item = &'a T;
    type IntoIter = hash_set::Iter<'a, T>;

    fn into_iter(self) -> hash_set::Iter<'a, T> {
        self.set.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_are_independent() {
        let original: Cognate<u32> = vec![1, 2, 3].into_iter().collect();
        let mut copy = original.clone();

        copy.insert(4);
        copy.remove(&1);

        assert_eq!(original.len(), 3);
        assert!(original.contains(&1));
        assert!(!original.contains(&4));
    }

    #[test]
    fn absorb_moves_every_element() {
        let mut first: Cognate<u32> = vec![1, 2].into_iter().collect();
        let second: Cognate<u32> = vec![2, 3].into_iter().collect();

        first.absorb(second);

        assert_eq!(first, vec![1, 2, 3].into_iter().collect::<Cognate<u32>>());
    }
}
