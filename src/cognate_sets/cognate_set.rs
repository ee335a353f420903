//! A partition of hashable elements in disjoint cognates.
//!
//! See [`CognateSet<T, S>`] for more information.
//!
//! [`CognateSet<T, S>`]: struct.CognateSet.html

use {
    std::{
        fmt,
        borrow::Borrow,
        hash::{Hash, BuildHasher},
        iter::FromIterator,
        collections::hash_map::{HashMap, RandomState},
    },
    tracing::{debug, trace},
    crate::{
        cognate_sets::{
            arena::{CognateArena, CognateId},
            cognate::Cognate,
            views::{CognatesMut, CognatesView, Elements, ElementsView, IntoCognates},
        },
        error::{CognateError, Result, TransferError},
    },
};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "proptest")]
use proptest::prelude::*;

/// A partition of hashable elements in disjoint cognates.
///
/// Every element of a `CognateSet` belongs to exactly one cognate and every cognate holds at
/// least one element.
/// Cognates grow with the `join` method, which merges every cognate that shares an element with
/// its input, and elements can be split out into a cognate of their own with the `reorg` method.
///
/// The cognates are stored in an arena and the index from elements to cognates only holds
/// handles into this arena.
/// Two cognates are therefore never confused, even while their contents are equal.
///
/// The cognates can be inspected in two ways.
/// The protected accessors like `cognate` and `cognates` hand out copies.
/// The unprotected accessors like `cognate_unchecked_mut` hand out the cognates stored in the
/// `CognateSet` itself.
///
/// # Examples
///
/// ```
/// use cognates::CognateSet;
///
/// let mut cognate_set = CognateSet::new();
/// cognate_set.join(vec!['a', 'b']);
/// cognate_set.join(vec!['b', 'c']);
///
/// assert!(cognate_set.same_cognate(&'a', &'c'));
/// assert!(cognate_set.amount_of_cognates() == 1);
///
/// cognate_set.reorg(vec!['a']);
///
/// assert!(!cognate_set.same_cognate(&'a', &'c'));
/// assert!(cognate_set.amount_of_cognates() == 2);
///
/// let cognate = cognate_set.pop_cognate(&'a').unwrap();
///
/// assert!(cognate.len() == 1);
/// assert!(cognate_set.len() == 2);
/// ```
#[derive(Clone)]
pub struct CognateSet<T, S = RandomState> {
    /// Maps each element to the handle of its cognate.
    pub(crate) index: HashMap<T, CognateId, S>,
    /// Owns the cognates.
    pub(crate) cognates: CognateArena<T, S>,
}

/// Creates a [`CognateSet`] containing the arguments.
///
/// There are two forms of the `cognate_set!` macro:
///
/// - Create a [`CognateSet`] from a list of cognates, each of which is joined in order:
///
/// ```
/// # #[macro_use]
/// # extern crate cognates;
/// #
/// # fn main() {
/// let cognate_set = cognate_set![['a', 'b'], ['c'], ['b', 'd']];
///
/// assert!(cognate_set.same_cognate(&'a', &'d'));
/// assert!(cognate_set.is_singleton(&'c'));
/// assert!(cognate_set.amount_of_cognates() == 2);
/// # }
/// ```
///
/// - Create a [`CognateSet`] containing a list of elements in the cognates specified:
///
/// ```
/// # #[macro_use]
/// # extern crate cognates;
/// #
/// # fn main() {
/// let cognate_set = cognate_set![
///     'a' => 0,
///     'b' => 1,
///     'c' => 0,
///     'd' => 2,
/// ];
///
/// assert!(cognate_set.same_cognate(&'a', &'c'));
/// assert!(cognate_set.is_singleton(&'b'));
/// assert!(cognate_set.amount_of_cognates() == 3);
/// # }
/// ```
///
/// You can use any identifiers that implement `Hash` and `Eq`.
/// Elements with the same identifier will be placed in the same cognate.
/// These identifiers will only be used when constructing a [`CognateSet`]
/// and will not be stored further.
///
/// [`CognateSet`]: cognate_sets/cognate_set/struct.CognateSet.html
#[macro_export]
macro_rules! cognate_set {
    () => {
        $crate::CognateSet::new()
    };
    ($([$($elem: expr),* $(,)?]),+ $(,)?) => {
        {
            let mut cognate_set = $crate::CognateSet::new();

            $(
                cognate_set.join([$($elem),*]);
            )+

            cognate_set
        }
    };
    ($($elem: expr => $cognate: expr),+ $(,)?) => {
        {
            let mut cognate_set = $crate::CognateSet::new();
            let mut map = ::std::collections::HashMap::new();

            $(
                let elem = $elem;

                match map.entry($cognate) {
                    ::std::collections::hash_map::Entry::Occupied(occupied) => {
                        cognate_set.join([::std::clone::Clone::clone(occupied.get()), elem]);
                    },
                    ::std::collections::hash_map::Entry::Vacant(vacant) => {
                        vacant.insert(::std::clone::Clone::clone(&elem));
                        cognate_set.join([elem]);
                    },
                }
            )+

            cognate_set
        }
    };
}

impl<T> CognateSet<T, RandomState> {
    /// Constructs a new, empty `CognateSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cognates::CognateSet;
    ///
    /// let cognate_set: CognateSet<u32> = CognateSet::new();
    ///
    /// assert!(cognate_set.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            cognates: CognateArena::new(),
        }
    }

    /// Constructs a new, empty `CognateSet<T>` with room for `capacity` elements.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            cognates: CognateArena::with_capacity(capacity),
        }
    }
}

impl<T, S> CognateSet<T, S> {
    /// Constructs a new, empty `CognateSet<T, S>` which will use the given hash builder.
    ///
    /// Every cognate of the `CognateSet` gets a clone of this hash builder.
    #[inline]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            index: HashMap::with_hasher(hash_builder),
            cognates: CognateArena::new(),
        }
    }

    /// Constructs a new, empty `CognateSet<T, S>` with room for `capacity` elements
    /// which will use the given hash builder.
    #[inline]
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            index: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            cognates: CognateArena::with_capacity(capacity),
        }
    }

    /// Returns a reference to the hash builder of the `CognateSet`.
    #[inline]
    pub fn hasher(&self) -> &S {
        self.index.hasher()
    }

    /// Returns the number of elements the `CognateSet` can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        usize::min(self.index.capacity(), self.cognates.capacity())
    }

    /// Returns the amount of elements in the `CognateSet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cognates::CognateSet;
    ///
    /// let mut cognate_set = CognateSet::new();
    /// cognate_set.join(vec![1, 2, 2]);
    /// cognate_set.join(vec![3]);
    ///
    /// assert!(cognate_set.len() == 3);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the `CognateSet` contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cognates.len() == 0
    }

    /// Returns the amount of cognates in the `CognateSet`.
    ///
    /// This will be done in `O(1)` time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cognates::CognateSet;
    ///
    /// let mut cognate_set = CognateSet::new();
    /// cognate_set.join(vec![1, 2]);
    /// cognate_set.join(vec![3]);
    ///
    /// assert!(cognate_set.amount_of_cognates() == 2);
    ///
    /// cognate_set.join(vec![2, 3]);
    ///
    /// assert!(cognate_set.amount_of_cognates() == 1);
    /// ```
    #[inline]
    pub fn amount_of_cognates(&self) -> usize {
        self.cognates.len()
    }

    /// Returns an iterator over the elements of the `CognateSet` in arbitrary order.
    #[inline]
    pub fn iter(&self) -> Elements<'_, T> {
        self.elements().iter()
    }

    /// Returns a view on the elements of the `CognateSet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cognates::CognateSet;
    ///
    /// let mut cognate_set = CognateSet::new();
    /// cognate_set.join(vec!['a', 'b']);
    /// cognate_set.join(vec!['c']);
    ///
    /// let elements = cognate_set.elements();
    ///
    /// assert!(elements.len() == 3);
    /// assert!(elements.contains(&'c'));
    /// assert!(!elements.contains(&'d'));
    /// ```
    #[inline]
    pub fn elements(&self) -> ElementsView<'_, T, S> {
        ElementsView::new(&self.index)
    }

    /// Returns a view on the cognates of the `CognateSet` that yields copies of the cognates.
    ///
    /// Changing these copies has no effect on the `CognateSet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cognates::CognateSet;
    ///
    /// let mut cognate_set = CognateSet::new();
    /// cognate_set.join(vec![1, 2]);
    /// cognate_set.join(vec![3]);
    ///
    /// let cognates = cognate_set.cognates();
    ///
    /// assert!(cognates.len() == 2);
    /// assert!(cognates.contains(&[2, 1]));
    /// assert!(!cognates.contains(&[1, 3]));
    ///
    /// for mut cognate in &cognates {
    ///     cognate.to_mut().insert(4);
    /// }
    ///
    /// assert!(!cognate_set.contains(&4));
    /// ```
    #[inline]
    pub fn cognates(&self) -> CognatesView<'_, T, S> {
        CognatesView::new(self, true)
    }

    /// Returns a view on the cognates of the `CognateSet` that yields the cognates stored in
    /// the `CognateSet` itself instead of copies.
    #[inline]
    pub fn cognates_unprotected(&self) -> CognatesView<'_, T, S> {
        CognatesView::new(self, false)
    }

    /// Returns an iterator over mutable references to the cognates stored in the `CognateSet`.
    ///
    /// Every cognate can be changed freely through this iterator but the `CognateSet` is not
    /// told about the changes.
    /// Adding, removing or moving elements will leave the `CognateSet` in an inconsistent state.
    /// No memory unsafety can follow from this but the results of later operations are
    /// unspecified until the changes are undone.
    #[inline]
    pub fn cognates_unchecked_mut(&mut self) -> CognatesMut<'_, T, S> {
        CognatesMut::new(&mut self.cognates)
    }

    /// Removes every element and cognate from the `CognateSet`.
    #[inline]
    pub fn clear(&mut self) {
        self.index.clear();
        self.cognates.clear();
    }
}

impl<T, S> CognateSet<T, S> where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone,
{
    /// Joins the given elements into a single cognate.
    ///
    /// Every cognate that contains one of the elements is merged and elements that are not yet
    /// in the `CognateSet` are added.
    /// Cognates are never split by this method.
    ///
    /// The largest of the merged cognates survives and the others are moved into it.
    /// When several are equally large the one whose element comes first in `elems` survives.
    /// The new elements only form the surviving cognate when they outnumber every existing
    /// cognate involved.
    ///
    /// This will be done in `O(k + m)` time where `k` is the amount of given elements and `m` is
    /// the amount of elements in all but the surviving cognate.
    ///
    /// # Examples
    ///
    /// ```
    /// use cognates::CognateSet;
    ///
    /// let mut cognate_set = CognateSet::new();
    /// cognate_set.join(vec![1, 2]);
    /// cognate_set.join(vec![3, 4]);
    ///
    /// assert!(cognate_set.amount_of_cognates() == 2);
    ///
    /// cognate_set.join(vec![2, 3, 5]);
    ///
    /// assert!(cognate_set.amount_of_cognates() == 1);
    /// assert!(cognate_set.len_of_cognate(&1) == 5);
    /// ```
    pub fn join<I>(&mut self, elems: I) where I: IntoIterator<Item = T> {
        let mut fresh = Cognate::with_hasher(self.index.hasher().clone());
        let mut touched = Vec::new();
        let mut seen = bit_vec![false; self.cognates.slot_count()];

        for elem in elems {
            match self.index.get(&elem) {
                Some(&id) => {
                    if seen.get(id.index()) == Some(false) {
                        seen.set(id.index(), true);
                        touched.push(id);
                    }
                },
                None => {
                    fresh.insert(elem);
                },
            }
        }

        // A single cognate holding all elements stays as it is.
        if fresh.is_empty() && touched.len() < 2 {
            return
        }

        let mut largest: Option<(usize, usize)> = None;
        for (position, &id) in touched.iter().enumerate() {
            let len = self.cognates.get(id).map_or(0, |cognate| cognate.len());

            if largest.map_or(true, |(_, max)| len > max) {
                largest = Some((position, len));
            }
        }

        let fresh_len = fresh.len();
        let survivor = match largest {
            Some((position, max)) if fresh_len <= max => {
                let id = touched.remove(position);
                self.merge_into(id, fresh);

                id
            },
            _ => {
                let id = self.cognates.insert(fresh);

                if let Some(cognate) = self.cognates.get(id) {
                    for elem in cognate.iter() {
                        self.index.insert(elem.clone(), id);
                    }
                }

                id
            },
        };

        for &id in &touched {
            if let Some(cognate) = self.cognates.remove(id) {
                self.merge_into(survivor, cognate);
            }
        }

        trace!(
            fresh = fresh_len,
            absorbed = touched.len(),
            len = self.cognates.get(survivor).map_or(0, |cognate| cognate.len()),
            "joined cognates"
        );
    }

    /// Joins the given elements into a single cognate, or changes nothing if one of them is an
    /// error.
    ///
    /// All elements are collected before the `CognateSet` is touched, so the first error is
    /// returned with the `CognateSet` unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use cognates::CognateSet;
    ///
    /// let mut cognate_set = CognateSet::new();
    ///
    /// let joined = cognate_set.try_join(vec!["1", "2"].into_iter().map(str::parse::<u32>));
    /// assert!(joined.is_ok());
    /// assert!(cognate_set.same_cognate(&1, &2));
    ///
    /// let joined = cognate_set.try_join(vec!["3", "x"].into_iter().map(str::parse::<u32>));
    /// assert!(joined.is_err());
    /// assert!(!cognate_set.contains(&3));
    /// ```
    pub fn try_join<I, E>(&mut self, elems: I) -> std::result::Result<(), E> where
        I: IntoIterator<Item = std::result::Result<T, E>>,
    {
        let elems = elems.into_iter().collect::<std::result::Result<Vec<T>, E>>()?;
        self.join(elems);

        Ok(())
    }

    /// Joins every cognate given by `source` in order.
    ///
    /// This is the same as calling `join` for each item of `source`.
    /// An owned `CognateSet` can be given as `source`, its cognates are then joined one by one.
    ///
    /// # Examples
    ///
    /// ```
    /// use cognates::CognateSet;
    ///
    /// let mut cognate_set = CognateSet::new();
    /// cognate_set.expand(vec![vec![1, 2], vec![3], vec![2, 4]]);
    ///
    /// assert!(cognate_set.amount_of_cognates() == 2);
    /// assert!(cognate_set.same_cognate(&1, &4));
    ///
    /// let mut other = CognateSet::new();
    /// other.join(vec![3, 4]);
    /// cognate_set.expand(other);
    ///
    /// assert!(cognate_set.amount_of_cognates() == 1);
    /// ```
    pub fn expand<I>(&mut self, source: I) where
        I: IntoIterator,
        I::Item: IntoIterator<Item = T>,
    {
        for elems in source {
            self.join(elems);
        }
    }

    /// Joins a copy of every cognate of `other`.
    ///
    /// `other` is left unchanged.
    pub fn expand_from<R>(&mut self, other: &CognateSet<T, R>) {
        for (_, cognate) in other.cognates.iter() {
            self.join(cognate.iter().cloned());
        }
    }

    /// Joins every cognate given by `source` in order, stopping at the first cognate that
    /// contains an error.
    ///
    /// Cognates joined before the failing one stay joined and the failing cognate changes
    /// nothing.
    /// The failure is returned as a `TransferError` which holds the position of the failing
    /// cognate and the error itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use cognates::CognateSet;
    ///
    /// let source = vec![vec!["1", "2"], vec!["3", "x"], vec!["4"]];
    ///
    /// let mut cognate_set = CognateSet::new();
    /// let result = cognate_set.try_expand(
    ///     source.into_iter().map(|cognate| cognate.into_iter().map(str::parse::<u32>)),
    /// );
    ///
    /// let error = result.unwrap_err();
    /// assert!(error.position == 1);
    /// assert!(error.into_inner().to_string() == "invalid digit found in string");
    ///
    /// assert!(cognate_set.same_cognate(&1, &2));
    /// assert!(!cognate_set.contains(&3));
    /// assert!(!cognate_set.contains(&4));
    /// ```
    pub fn try_expand<I, J, E>(&mut self, source: I) -> std::result::Result<(), TransferError<E>>
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = std::result::Result<T, E>>,
    {
        for (position, elems) in source.into_iter().enumerate() {
            if let Err(error) = self.try_join(elems) {
                debug!(position, "aborted joining cognates");

                return Err(TransferError::new(position, error))
            }
        }

        Ok(())
    }

    /// Creates a `CognateSet` by joining every cognate given by `source` in order.
    ///
    /// Fails like `try_expand` does.
    pub fn try_from_iter<I, J, E>(source: I) -> std::result::Result<Self, TransferError<E>> where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = std::result::Result<T, E>>,
        S: Default,
    {
        let mut cognate_set = Self::with_hasher(S::default());
        cognate_set.try_expand(source)?;

        Ok(cognate_set)
    }

    /// Puts the given elements together in a new cognate.
    ///
    /// Unlike `join` this splits each element out of the cognate it was in before.
    /// Cognates left without elements are removed.
    /// Nothing changes if `elems` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cognates::CognateSet;
    ///
    /// let mut cognate_set = CognateSet::new();
    /// cognate_set.join(vec!['a', 'b', 'c']);
    /// cognate_set.join(vec!['d']);
    ///
    /// cognate_set.reorg(vec!['c', 'd', 'e']);
    ///
    /// assert!(cognate_set.amount_of_cognates() == 2);
    /// assert!(cognate_set.same_cognate(&'a', &'b'));
    /// assert!(cognate_set.same_cognate(&'c', &'e'));
    /// assert!(cognate_set.len() == 5);
    /// ```
    pub fn reorg<I>(&mut self, elems: I) where I: IntoIterator<Item = T> {
        let mut cognate = Cognate::with_hasher(self.index.hasher().clone());
        cognate.extend(elems);

        if cognate.is_empty() {
            return
        }

        for elem in cognate.iter() {
            if let Some(id) = self.index.remove(elem) {
                self.detach(id, elem);
            }
        }

        let id = self.cognates.insert(cognate);

        if let Some(cognate) = self.cognates.get(id) {
            for elem in cognate.iter() {
                self.index.insert(elem.clone(), id);
            }

            trace!(len = cognate.len(), "reorganized cognate");
        }
    }

    /// Returns a copy of the cognate containing `elem`, or an empty cognate if `elem` is not in
    /// the `CognateSet`.
    ///
    /// Changing the copy has no effect on the `CognateSet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cognates::CognateSet;
    ///
    /// let mut cognate_set = CognateSet::new();
    /// cognate_set.join(vec![1, 2]);
    ///
    /// let mut cognate = cognate_set.cognate(&1);
    /// cognate.insert(3);
    ///
    /// assert!(cognate_set.cognate(&1).len() == 2);
    /// assert!(cognate_set.cognate(&3).is_empty());
    /// ```
    pub fn cognate<Q>(&self, elem: &Q) -> Cognate<T, S> where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.cognate_ref(elem) {
            Some(cognate) => cognate.clone(),
            None => Cognate::with_hasher(self.index.hasher().clone()),
        }
    }

    /// Returns a reference to the cognate containing `elem` as it is stored in the `CognateSet`.
    #[inline]
    pub fn cognate_ref<Q>(&self, elem: &Q) -> Option<&Cognate<T, S>> where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cognates.get(*self.index.get(elem)?)
    }

    /// Returns a mutable reference to the cognate containing `elem` as it is stored in the
    /// `CognateSet`.
    ///
    /// The `CognateSet` is not told about changes made through this reference.
    /// Adding or removing elements will leave the `CognateSet` in an inconsistent state.
    /// No memory unsafety can follow from this but the results of later operations are
    /// unspecified until the changes are undone.
    #[inline]
    pub fn cognate_unchecked_mut<Q>(&mut self, elem: &Q) -> Option<&mut Cognate<T, S>> where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cognates.get_mut(*self.index.get(elem)?)
    }

    /// Removes and returns an arbitrary cognate.
    ///
    /// The elements of the cognate are no longer part of the `CognateSet`.
    ///
    /// # Errors
    ///
    /// Returns `CognateError::Empty` if there are no cognates.
    ///
    /// # Examples
    ///
    /// ```
    /// use cognates::{CognateError, CognateSet};
    ///
    /// let mut cognate_set = CognateSet::new();
    /// cognate_set.join(vec![1, 2]);
    ///
    /// assert!(cognate_set.pop().unwrap().len() == 2);
    /// assert!(cognate_set.is_empty());
    /// assert!(cognate_set.pop() == Err(CognateError::Empty));
    /// ```
    pub fn pop(&mut self) -> Result<Cognate<T, S>> {
        let id = self.cognates.last_id().ok_or(CognateError::Empty)?;

        self.take(id).ok_or(CognateError::Empty)
    }

    /// Removes and returns the cognate containing `elem`.
    ///
    /// The elements of the cognate are no longer part of the `CognateSet`.
    ///
    /// # Errors
    ///
    /// Returns `CognateError::ElementNotFound` if `elem` is not in the `CognateSet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cognates::{CognateError, CognateSet};
    ///
    /// let mut cognate_set = CognateSet::new();
    /// cognate_set.join(vec![1, 2]);
    /// cognate_set.join(vec![3]);
    ///
    /// let cognate = cognate_set.pop_cognate(&2).unwrap();
    ///
    /// assert!(cognate.contains(&1));
    /// assert!(!cognate_set.contains(&1));
    /// assert!(cognate_set.pop_cognate(&1).unwrap_err() == CognateError::ElementNotFound);
    /// ```
    pub fn pop_cognate<Q>(&mut self, elem: &Q) -> Result<Cognate<T, S>> where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(elem).ok_or(CognateError::ElementNotFound)?;

        self.take(id).ok_or(CognateError::ElementNotFound)
    }

    /// Removes and returns the cognate containing `elem`, or returns `default` if `elem` is not
    /// in the `CognateSet`.
    pub fn pop_cognate_or<Q>(&mut self, elem: &Q, default: Cognate<T, S>) -> Cognate<T, S> where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.pop_cognate(elem).unwrap_or(default)
    }

    /// Removes `elem` from the `CognateSet` and returns it.
    ///
    /// The other elements of its cognate stay in the `CognateSet`.
    ///
    /// # Errors
    ///
    /// Returns `CognateError::ElementNotFound` if `elem` is not in the `CognateSet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cognates::CognateSet;
    ///
    /// let mut cognate_set = CognateSet::new();
    /// cognate_set.join(vec![1, 2]);
    /// cognate_set.join(vec![3]);
    ///
    /// assert!(cognate_set.remove_element(&1) == Ok(1));
    /// assert!(cognate_set.amount_of_cognates() == 2);
    ///
    /// assert!(cognate_set.remove_element(&3) == Ok(3));
    /// assert!(cognate_set.amount_of_cognates() == 1);
    ///
    /// assert!(cognate_set.remove_element(&3).is_err());
    /// ```
    pub fn remove_element<Q>(&mut self, elem: &Q) -> Result<T> where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (elem, id) = self.index.remove_entry(elem).ok_or(CognateError::ElementNotFound)?;
        self.detach::<T>(id, &elem);

        trace!("removed element");

        Ok(elem)
    }

    /// Removes the whole cognate containing `elem` and returns the amount of elements removed.
    ///
    /// # Errors
    ///
    /// Returns `CognateError::ElementNotFound` if `elem` is not in the `CognateSet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cognates::CognateSet;
    ///
    /// let mut cognate_set = CognateSet::new();
    /// cognate_set.join(vec![1, 2]);
    /// cognate_set.join(vec![3]);
    ///
    /// assert!(cognate_set.remove_cognate(&1) == Ok(2));
    /// assert!(cognate_set.len() == 1);
    /// assert!(!cognate_set.contains(&2));
    /// ```
    pub fn remove_cognate<Q>(&mut self, elem: &Q) -> Result<usize> where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let cognate = self.pop_cognate(elem)?;

        Ok(cognate.len())
    }

    /// Returns `true` if `elem` is in the `CognateSet`.
    #[inline]
    pub fn contains<Q>(&self, elem: &Q) -> bool where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(elem)
    }

    /// Returns `true` if `first_elem` and `second_elem` are in the same cognate.
    ///
    /// Returns `false` if either is not in the `CognateSet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cognates::CognateSet;
    ///
    /// let mut cognate_set = CognateSet::new();
    /// cognate_set.join(vec![1, 3]);
    /// cognate_set.join(vec![2]);
    ///
    /// assert!(cognate_set.same_cognate(&1, &3));
    /// assert!(!cognate_set.same_cognate(&1, &2));
    /// assert!(!cognate_set.same_cognate(&1, &4));
    /// ```
    pub fn same_cognate<Q1, Q2>(&self, first_elem: &Q1, second_elem: &Q2) -> bool where
        T: Borrow<Q1> + Borrow<Q2>,
        Q1: Hash + Eq + ?Sized,
        Q2: Hash + Eq + ?Sized,
    {
        match (self.index.get(first_elem), self.index.get(second_elem)) {
            (Some(first), Some(second)) => first == second,
            _ => false,
        }
    }

    /// Returns the amount of elements in the cognate containing `elem`, or `0` if `elem` is not
    /// in the `CognateSet`.
    #[inline]
    pub fn len_of_cognate<Q>(&self, elem: &Q) -> usize where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cognate_ref(elem).map_or(0, |cognate| cognate.len())
    }

    /// Returns `true` if `elem` is the only element of its cognate.
    #[inline]
    pub fn is_singleton<Q>(&self, elem: &Q) -> bool where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.len_of_cognate(elem) == 1
    }

    /// Reserves capacity for at least `additional` more elements.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.index.reserve(additional);
        self.cognates.reserve(additional);
    }

    /// Shrinks the capacity of the `CognateSet` as much as possible.
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.index.shrink_to_fit();
        self.cognates.shrink_to_fit();
    }

    /// Moves `elems` into the cognate `id` and points their index entries at it.
    fn merge_into(&mut self, id: CognateId, elems: Cognate<T, S>) {
        for elem in elems.iter() {
            match self.index.get_mut(elem) {
                Some(entry) => *entry = id,
                None => {
                    self.index.insert(elem.clone(), id);
                },
            }
        }

        if let Some(cognate) = self.cognates.get_mut(id) {
            cognate.absorb(elems);
        }
    }

    /// Removes `elem` from the cognate `id` and drops the cognate once it is empty.
    /// The index entry of `elem` is left to the caller.
    fn detach<Q>(&mut self, id: CognateId, elem: &Q) where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(cognate) = self.cognates.get_mut(id) {
            cognate.remove(elem);

            if cognate.is_empty() {
                self.cognates.remove(id);
            }
        }
    }

    /// Takes the cognate `id` out of the `CognateSet` together with its elements.
    fn take(&mut self, id: CognateId) -> Option<Cognate<T, S>> {
        let cognate = self.cognates.remove(id)?;

        for elem in cognate.iter() {
            self.index.remove(elem);
        }

        trace!(len = cognate.len(), "took cognate");

        Some(cognate)
    }
}

impl<T> Default for CognateSet<T, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> fmt::Debug for CognateSet<T, S> where T: fmt::Debug {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.debug_set().entries(self.cognates.iter().map(|(_, cognate)| cognate)).finish()
    }
}

impl<T, S> PartialEq for CognateSet<T, S> where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Two `CognateSet`s are equal if they contain the same elements divided in the same
    /// cognates, in whatever order these were joined.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.cognates() == other.cognates()
    }
}

impl<T, S> Eq for CognateSet<T, S> where
    T: Eq + Hash,
    S: BuildHasher,
{}

impl<T, S, J> FromIterator<J> for CognateSet<T, S> where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone + Default,
    J: IntoIterator<Item = T>,
{
    fn from_iter<I>(iter: I) -> Self where I: IntoIterator<Item = J> {
        let mut cognate_set = Self::with_hasher(S::default());
        cognate_set.expand(iter);

        cognate_set
    }
}

impl<T, S, J> Extend<J> for CognateSet<T, S> where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone,
    J: IntoIterator<Item = T>,
{
    fn extend<I>(&mut self, iter: I) where I: IntoIterator<Item = J> {
        self.expand(iter);
    }
}

impl<T, S> IntoIterator for CognateSet<T, S> {
    type Item = Cognate<T, S>;
    type IntoIter = IntoCognates<T, S>;

    fn into_iter(self) -> IntoCognates<T, S> {
        IntoCognates::new(self.cognates)
    }
}

impl<'a, T, S> IntoIterator for &'a CognateSet<T, S> {
    type Item = &'a T;
    type IntoIter = Elements<'a, T>;

    fn into_iter(self) -> Elements<'a, T> {
        self.iter()
    }
}

#[cfg(feature = "rayon")]
impl<T, S, J> FromParallelIterator<J> for CognateSet<T, S> where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone + Default,
    J: IntoIterator<Item = T> + Send,
{
    fn from_par_iter<I>(par_iter: I) -> Self where I: IntoParallelIterator<Item = J> {
        // The cognates are joined in order so only collecting them is done in parallel.
        let cognates: Vec<J> = par_iter.into_par_iter().collect();

        Self::from_iter(cognates)
    }
}

#[cfg(feature = "rayon")]
impl<T, S, J> ParallelExtend<J> for CognateSet<T, S> where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone,
    J: IntoIterator<Item = T> + Send,
{
    fn par_extend<I>(&mut self, par_iter: I) where I: IntoParallelIterator<Item = J> {
        let cognates: Vec<J> = par_iter.into_par_iter().collect();

        self.expand(cognates);
    }
}

#[cfg(feature = "proptest")]
impl<T> Arbitrary for CognateSet<T> where
    T: Arbitrary + Eq + Hash + Clone + 'static,
    T::Strategy: 'static,
{
    type Parameters = (proptest::collection::SizeRange, T::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        use std::collections::hash_map;

        let (size_range, params) = params;
        let params = (size_range, (params, ()));

        (Vec::<(T, usize)>::arbitrary_with(params)).prop_map(|vec| {
            let mut cognate_set = Self::with_capacity(vec.len());

            // We map a `cognate_number` to an element of that cognate.
            let mut map = hash_map::HashMap::with_capacity(vec.len());

            for (elem, cognate_number) in vec {
                let cognate_number = cognate_number.trailing_zeros();

                match map.entry(cognate_number) {
                    hash_map::Entry::Occupied(occupied) => {
                        cognate_set.join(vec![T::clone(occupied.get()), elem]);
                    },
                    hash_map::Entry::Vacant(vacant) => {
                        vacant.insert(elem.clone());
                        cognate_set.join(vec![elem]);
                    },
                }
            }

            cognate_set
        }).boxed()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        proptest::{
            prop_assert,
            prop_assert_eq,
            proptest,
            collection::vec,
            strategy::Strategy,
        },
    };

    /// Checks every invariant that holds between the index and the arena.
    fn assert_consistent<T>(cognate_set: &CognateSet<T>) where
        T: Eq + Hash + Clone + fmt::Debug,
    {
        let mut total = 0;

        for (id, cognate) in cognate_set.cognates.iter() {
            assert!(!cognate.is_empty(), "empty cognate in {:?}", cognate_set);

            for elem in cognate.iter() {
                assert_eq!(cognate_set.index.get(elem), Some(&id), "{:?}", cognate_set);
            }

            total += cognate.len();
        }

        assert_eq!(total, cognate_set.len());
        assert_eq!(cognate_set.cognates.len(), cognate_set.cognates.iter().count());
    }

    fn of(groups: &[&[char]]) -> CognateSet<char> {
        groups.iter().map(|group| group.iter().cloned()).collect()
    }

    #[test]
    fn join_merges_and_adds() {
        let mut cognate_set = CognateSet::new();

        cognate_set.join(vec!['a', 'b']);
        assert_eq!(cognate_set, of(&[&['a', 'b']]));

        cognate_set.join(vec!['b', 'c']);
        assert_eq!(cognate_set, of(&[&['a', 'b', 'c']]));
        assert_eq!(cognate_set.amount_of_cognates(), 1);
        assert_consistent(&cognate_set);
    }

    #[test]
    fn join_within_one_cognate_keeps_its_handle() {
        let mut cognate_set = of(&[&['a', 'b', 'c'], &['d']]);
        let before = cognate_set.index.clone();

        cognate_set.join(vec!['a', 'c', 'c']);
        cognate_set.join(Vec::new());

        assert_eq!(cognate_set.index, before);
        assert_eq!(cognate_set.amount_of_cognates(), 2);
    }

    #[test]
    fn largest_cognate_survives() {
        let mut cognate_set = CognateSet::new();
        cognate_set.join(vec![1]);
        cognate_set.join(vec![2, 3, 4]);
        let large = cognate_set.index[&2];

        cognate_set.join(vec![1, 2, 5]);

        assert_eq!(cognate_set.index[&1], large);
        assert_eq!(cognate_set.index[&5], large);
        assert_eq!(cognate_set.len_of_cognate(&1), 5);
        assert_consistent(&cognate_set);
    }

    #[test]
    fn first_seen_cognate_wins_a_tie() {
        let mut cognate_set = CognateSet::new();
        cognate_set.join(vec![1, 2]);
        cognate_set.join(vec![3, 4]);
        let second = cognate_set.index[&3];

        cognate_set.join(vec![3, 1, 9, 8]);

        // The two new elements do not outnumber the existing cognates.
        assert_eq!(cognate_set.index[&1], second);
        assert_eq!(cognate_set.index[&9], second);
        assert_consistent(&cognate_set);
    }

    #[test]
    fn larger_new_elements_survive() {
        let mut cognate_set = CognateSet::new();
        cognate_set.join(vec![1]);
        let old = cognate_set.index[&1];

        cognate_set.join(vec![1, 2, 3]);

        assert_ne!(cognate_set.index[&1], old);
        assert_eq!(cognate_set.amount_of_cognates(), 1);
        assert_consistent(&cognate_set);
    }

    #[test]
    fn reorg_splits_elements_out() {
        let mut cognate_set = of(&[&['x', 'y']]);

        cognate_set.reorg(vec!['x']);

        assert!(!cognate_set.same_cognate(&'x', &'y'));
        assert_eq!(cognate_set.cognate(&'y').len(), 1);
        assert_eq!(cognate_set, of(&[&['x'], &['y']]));
        assert_consistent(&cognate_set);
    }

    #[test]
    fn reorg_drops_emptied_cognates() {
        let mut cognate_set = of(&[&['x'], &['y', 'z']]);

        cognate_set.reorg(vec!['x', 'y', 'w', 'w']);

        assert_eq!(cognate_set.amount_of_cognates(), 2);
        assert_eq!(cognate_set, of(&[&['x', 'y', 'w'], &['z']]));
        assert_consistent(&cognate_set);

        cognate_set.reorg(Vec::new());
        assert_eq!(cognate_set.amount_of_cognates(), 2);
    }

    #[test]
    fn join_reorg_pop_scenario() {
        let mut cognate_set = CognateSet::new();

        cognate_set.join(vec!['a', 'b']);
        cognate_set.join(vec!['b', 'c']);
        cognate_set.reorg(vec!['a']);

        assert_eq!(cognate_set, of(&[&['a'], &['b', 'c']]));

        let popped = cognate_set.pop_cognate(&'a').unwrap();

        assert_eq!(popped, vec!['a'].into_iter().collect::<Cognate<char>>());
        assert_eq!(cognate_set, of(&[&['b', 'c']]));
        assert_eq!(cognate_set.len(), 2);
        assert_consistent(&cognate_set);
    }

    #[test]
    fn protected_copies_are_independent() {
        let mut cognate_set = of(&[&['x', 'y']]);

        let mut copy = cognate_set.cognate(&'x');
        copy.insert('z');
        copy.remove(&'y');

        let expected: Cognate<char> = vec!['x', 'y'].into_iter().collect();
        assert_eq!(cognate_set.cognate(&'x'), expected);

        for mut cognate in &cognate_set.cognates() {
            cognate.to_mut().clear();
        }

        assert_eq!(cognate_set.len_of_cognate(&'x'), 2);
        assert_consistent(&cognate_set);

        let copy = cognate_set.clone();
        cognate_set.join(vec!['x', 'w']);
        assert_eq!(copy, of(&[&['x', 'y']]));
    }

    #[test]
    fn unchecked_mutation_is_visible() {
        let mut cognate_set = of(&[&['a', 'b']]);

        if let Some(cognate) = cognate_set.cognate_unchecked_mut(&'a') {
            cognate.insert('z');
        }

        assert_eq!(cognate_set.len_of_cognate(&'a'), 3);
        assert!(!cognate_set.contains(&'z'));

        for cognate in cognate_set.cognates_unchecked_mut() {
            cognate.remove(&'z');
        }

        assert_consistent(&cognate_set);
    }

    #[test]
    fn removals() {
        let mut cognate_set = of(&[&['a', 'b'], &['c']]);

        assert_eq!(cognate_set.remove_element(&'c'), Ok('c'));
        assert_eq!(cognate_set.amount_of_cognates(), 1);
        assert_eq!(cognate_set.remove_element(&'c'), Err(CognateError::ElementNotFound));
        assert_eq!(cognate_set.remove_cognate(&'c'), Err(CognateError::ElementNotFound));

        assert_eq!(cognate_set.remove_cognate(&'b'), Ok(2));
        assert!(cognate_set.is_empty());
        assert_eq!(cognate_set.pop(), Err(CognateError::Empty));
        assert_consistent(&cognate_set);
    }

    #[test]
    fn remove_element_by_borrowed_key() {
        let mut cognate_set: CognateSet<String> = CognateSet::new();
        cognate_set.join(vec!["ab".to_string(), "cd".to_string()]);
        cognate_set.join(vec!["ef".to_string()]);

        assert_eq!(cognate_set.remove_element("ab"), Ok("ab".to_string()));
        assert!(!cognate_set.contains("ab"));
        assert!(cognate_set.is_singleton("cd"));

        assert_eq!(cognate_set.remove_element("ef"), Ok("ef".to_string()));
        assert_eq!(cognate_set.amount_of_cognates(), 1);
        assert_eq!(cognate_set.remove_element("ef"), Err(CognateError::ElementNotFound));
        assert_consistent(&cognate_set);
    }

    #[test]
    fn pop_with_default() {
        let mut cognate_set = of(&[&['a', 'b']]);
        let default: Cognate<char> = vec!['d'].into_iter().collect();

        assert_eq!(cognate_set.pop_cognate_or(&'z', default.clone()), default);
        assert_eq!(cognate_set.len(), 2);
        assert_eq!(cognate_set.pop_cognate_or(&'a', default).len(), 2);
        assert!(cognate_set.is_empty());
    }

    #[test]
    fn pop_detaches_every_element() {
        let mut cognate_set = of(&[&['a', 'b'], &['c']]);

        while let Ok(cognate) = cognate_set.pop() {
            for elem in cognate.iter() {
                assert!(!cognate_set.contains(elem));
            }
            assert_consistent(&cognate_set);
        }

        assert!(cognate_set.is_empty());
        assert_eq!(cognate_set.len(), 0);
    }

    #[test]
    fn expand_from_another_cognate_set() {
        let mut first = of(&[&['a', 'b'], &['c']]);
        let second = of(&[&['b', 'c'], &['d']]);

        first.expand_from(&second);

        assert_eq!(first, of(&[&['a', 'b', 'c'], &['d']]));
        assert_eq!(second, of(&[&['b', 'c'], &['d']]));
        assert_consistent(&first);

        let mut third = CognateSet::new();
        third.expand(second);
        assert_eq!(third, of(&[&['b', 'c'], &['d']]));
    }

    #[test]
    fn try_from_iter_stops_at_the_first_error() {
        let source = vec![vec![Ok(1u32), Ok(2)], vec![Err("bad"), Ok(3)], vec![Ok(4)]];

        let result = CognateSet::<u32>::try_from_iter(source);

        let error = result.unwrap_err();
        assert_eq!(error.position, 1);
        assert_eq!(error.into_inner(), "bad");

        let source: Vec<Vec<std::result::Result<u32, &str>>> = vec![vec![Ok(1)], vec![Ok(2)]];
        let cognate_set = CognateSet::<u32>::try_from_iter(source).unwrap();
        assert_eq!(cognate_set.amount_of_cognates(), 2);
    }

    #[test]
    fn macro_forms() {
        let empty: CognateSet<u32> = cognate_set![];
        assert!(empty.is_empty());

        assert_eq!(cognate_set![['a', 'b'], ['c']], of(&[&['a', 'b'], &['c']]));
        assert_eq!(cognate_set!['a' => 1, 'b' => 2, 'c' => 1], of(&[&['a', 'c'], &['b']]));
    }

    #[test]
    fn clear_and_shrink() {
        let mut cognate_set = of(&[&['a', 'b'], &['c']]);

        cognate_set.remove_cognate(&'c').unwrap();
        cognate_set.shrink_to_fit();
        assert_eq!(cognate_set, of(&[&['a', 'b']]));
        cognate_set.join(vec!['d']);
        assert_consistent(&cognate_set);

        cognate_set.clear();
        assert!(cognate_set.is_empty());
        assert_eq!(cognate_set.len(), 0);
        assert_eq!(cognate_set.amount_of_cognates(), 0);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn collect_in_parallel() {
        let cognate_set: CognateSet<u32> = (0 .. 10u32)
            .into_par_iter()
            .map(|i| vec![i, i % 3])
            .collect();

        assert_eq!(cognate_set.len(), 10);
        assert_eq!(cognate_set.amount_of_cognates(), 3);
        assert_consistent(&cognate_set);
    }

    fn groups() -> impl Strategy<Value = Vec<Vec<u8>>> {
        vec(vec(0u8 .. 24, 0 .. 5), 0 .. 12)
    }

    proptest! {
        #[test]
        fn expand_keeps_invariants(groups in groups()) {
            let mut cognate_set = CognateSet::new();

            for group in &groups {
                let amount = cognate_set.amount_of_cognates();
                cognate_set.join(group.iter().cloned());

                prop_assert!(cognate_set.amount_of_cognates() <= amount + 1);
                assert_consistent(&cognate_set);

                if let Some(first) = group.first() {
                    for elem in group {
                        prop_assert!(cognate_set.same_cognate(first, elem));
                    }
                }
            }
        }

        #[test]
        fn join_is_idempotent(groups in groups()) {
            let mut cognate_set: CognateSet<u8> = groups.iter().cloned().collect();
            let before = cognate_set.index.clone();

            cognate_set.expand(groups.iter().cloned());

            prop_assert_eq!(cognate_set.index, before);
        }

        #[test]
        fn join_order_does_not_matter(groups in groups()) {
            let forward: CognateSet<u8> = groups.iter().cloned().collect();
            let backward: CognateSet<u8> = groups.iter().rev().cloned().collect();

            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn chained_joins_equal_one_join(a in 0u8 .. 8, b in 0u8 .. 8, c in 0u8 .. 8) {
            let mut chained = CognateSet::new();
            chained.join(vec![a, b]);
            chained.join(vec![b, c]);

            let mut single = CognateSet::new();
            single.join(vec![a, b, c]);

            prop_assert_eq!(chained, single);
        }

        #[test]
        fn join_sums_the_merged_cognates(groups in groups(), joined in vec(0u8 .. 32, 1 .. 6)) {
            let mut cognate_set: CognateSet<u8> = groups.iter().cloned().collect();

            let mut expected = std::collections::HashSet::new();
            for elem in &joined {
                expected.insert(*elem);
                expected.extend(cognate_set.cognate(elem).iter().cloned());
            }

            cognate_set.join(joined.iter().cloned());

            let cognate = cognate_set.cognate(&joined[0]);
            prop_assert_eq!(cognate.len(), expected.len());
            prop_assert_eq!(cognate.into_set(), expected);
            assert_consistent(&cognate_set);
        }

        #[test]
        fn reorg_and_removal_keep_invariants(
            groups in groups(),
            moved in vec(0u8 .. 32, 0 .. 6),
            removed in vec(0u8 .. 32, 0 .. 6),
        ) {
            let mut cognate_set: CognateSet<u8> = groups.iter().cloned().collect();

            cognate_set.reorg(moved.iter().cloned());
            assert_consistent(&cognate_set);

            if let Some(first) = moved.first() {
                prop_assert_eq!(
                    cognate_set.cognate(first).into_set(),
                    moved.iter().cloned().collect::<std::collections::HashSet<u8>>(),
                );
            }

            for elem in &removed {
                let amount = cognate_set.amount_of_cognates();
                let was_singleton = cognate_set.is_singleton(elem);

                match cognate_set.remove_element(elem) {
                    Ok(_) => {
                        let expected = if was_singleton { amount - 1 } else { amount };
                        prop_assert_eq!(cognate_set.amount_of_cognates(), expected);
                    },
                    Err(error) => {
                        prop_assert_eq!(error, CognateError::ElementNotFound);
                    },
                }

                prop_assert!(!cognate_set.contains(elem));
                assert_consistent(&cognate_set);
            }
        }
    }

    #[cfg(feature = "proptest")]
    proptest! {
        #[test]
        fn arbitrary_cognate_sets_are_consistent(cognate_set in any::<CognateSet<u16>>()) {
            assert_consistent(&cognate_set);
            prop_assert_eq!(cognate_set.clone(), cognate_set);
        }
    }
}
