//! Views on the elements and cognates of a `CognateSet` and the iterators they create.

use {
    std::{
        fmt,
        slice,
        vec,
        borrow::{Borrow, Cow},
        hash::{Hash, BuildHasher},
        iter::FusedIterator,
        collections::{
            HashSet,
            hash_map::{self, HashMap},
        },
    },
    crate::cognate_sets::{
        arena::{CognateArena, CognateId, Slot},
        cognate::Cognate,
        cognate_set::CognateSet,
    },
};

/// A view on the elements of a `CognateSet`.
///
/// This struct is created by the [`elements`] method on [`CognateSet<T, S>`].
/// See its documentation for more.
///
/// [`elements`]: ../cognate_set/struct.CognateSet.html#method.elements
/// [`CognateSet<T, S>`]: ../cognate_set/struct.CognateSet.html
pub struct ElementsView<'a, T: 'a, S: 'a> {
    index: &'a HashMap<T, CognateId, S>,
}

impl<'a, T, S> ElementsView<'a, T, S> {
    #[inline]
    pub(crate) fn new(index: &'a HashMap<T, CognateId, S>) -> Self {
        Self { index }
    }

    /// Returns an iterator over the elements in arbitrary order.
    #[inline]
    pub fn iter(&self) -> Elements<'a, T> {
        Elements {
            keys: self.index.keys(),
        }
    }

    /// Returns the amount of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if there are no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl<'a, T, S> ElementsView<'a, T, S> where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Returns `true` if `elem` is one of the elements.
    #[inline]
    pub fn contains<Q>(&self, elem: &Q) -> bool where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(elem)
    }
}

impl<'a, T, S> Clone for ElementsView<'a, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, S> Copy for ElementsView<'a, T, S> {}

impl<'a, 'b, T, S> PartialEq<ElementsView<'b, T, S>> for ElementsView<'a, T, S> where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Two views are equal if they hold the same elements.
    fn eq(&self, other: &ElementsView<'b, T, S>) -> bool {
        self.len() == other.len() && self.iter().all(|elem| other.contains(elem))
    }
}

impl<'a, T, S> fmt::Debug for ElementsView<'a, T, S> where T: fmt::Debug {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T, S> IntoIterator for ElementsView<'a, T, S> {
    type Item = &'a T;
    type IntoIter = Elements<'a, T>;

    fn into_iter(self) -> Elements<'a, T> {
        self.iter()
    }
}

impl<'a, 'b, T, S> IntoIterator for &'b ElementsView<'a, T, S> {
    type Item = &'a T;
    type IntoIter = Elements<'a, T>;

    fn into_iter(self) -> Elements<'a, T> {
        self.iter()
    }
}

/// An iterator over the elements of a `CognateSet`.
///
/// This struct is created by the [`iter`] method on [`CognateSet<T, S>`] and on
/// [`ElementsView`].
///
/// [`iter`]: ../cognate_set/struct.CognateSet.html#method.iter
/// [`CognateSet<T, S>`]: ../cognate_set/struct.CognateSet.html
/// [`ElementsView`]: struct.ElementsView.html
pub struct Elements<'a, T: 'a> {
    keys: hash_map::Keys<'a, T, CognateId>,
}

impl<'a, T> Clone for Elements<'a, T> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
        }
    }
}

impl<'a, T> Iterator for Elements<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.keys.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for Elements<'a, T> {}

impl<'a, T> FusedIterator for Elements<'a, T> {}

impl<'a, T> fmt::Debug for Elements<'a, T> where T: fmt::Debug {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.debug_list().entries(self.clone()).finish()
    }
}

/// A view on the cognates of a `CognateSet`.
///
/// This struct is created by the [`cognates`] and [`cognates_unprotected`] methods on
/// [`CognateSet<T, S>`].
/// A protected view yields a copy of each cognate which can be changed freely.
/// An unprotected view yields the cognates stored in the `CognateSet` itself.
///
/// Both are iterated as `Cow<Cognate<T, S>>`: protected views give `Cow::Owned` and
/// unprotected views give `Cow::Borrowed`.
///
/// [`cognates`]: ../cognate_set/struct.CognateSet.html#method.cognates
/// [`cognates_unprotected`]: ../cognate_set/struct.CognateSet.html#method.cognates_unprotected
/// [`CognateSet<T, S>`]: ../cognate_set/struct.CognateSet.html
pub struct CognatesView<'a, T: 'a, S: 'a> {
    cognate_set: &'a CognateSet<T, S>,
    protect: bool,
}

impl<'a, T, S> CognatesView<'a, T, S> {
    #[inline]
    pub(crate) fn new(cognate_set: &'a CognateSet<T, S>, protect: bool) -> Self {
        Self {
            cognate_set,
            protect,
        }
    }

    /// Returns `true` if the view yields copies of the cognates.
    #[inline]
    pub fn is_protected(&self) -> bool {
        self.protect
    }

    /// Returns an iterator over the cognates in arbitrary order.
    #[inline]
    pub fn iter(&self) -> Cognates<'a, T, S> {
        Cognates {
            slots: self.cognate_set.cognates.slots(),
            remaining: self.cognate_set.cognates.len(),
            protect: self.protect,
        }
    }

    /// Returns the amount of cognates.
    #[inline]
    pub fn len(&self) -> usize {
        self.cognate_set.cognates.len()
    }

    /// Returns `true` if there are no cognates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a, T, S> CognatesView<'a, T, S> where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Returns `true` if one of the cognates holds exactly the given elements.
    ///
    /// The elements may be given in any order and may repeat.
    /// No cognate is empty so this returns `false` when no elements are given.
    ///
    /// # Examples
    ///
    /// ```
    /// use cognates::CognateSet;
    ///
    /// let mut cognate_set = CognateSet::new();
    /// cognate_set.join(vec![1, 2, 3]);
    ///
    /// let cognates = cognate_set.cognates();
    ///
    /// assert!(cognates.contains(&[3, 1, 2, 1]));
    /// assert!(!cognates.contains(&[1, 2]));
    /// assert!(!cognates.contains(&[] as &[i32]));
    /// ```
    pub fn contains<'b, I, Q>(&self, elems: I) -> bool where
        I: IntoIterator<Item = &'b Q>,
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'b,
    {
        let mut found = None;
        let mut distinct = HashSet::new();

        for elem in elems {
            let id = match self.cognate_set.index.get(elem) {
                Some(&id) => id,
                None => return false,
            };

            if *found.get_or_insert(id) != id {
                return false
            }

            distinct.insert(elem);
        }

        match found {
            Some(id) => self.cognate_set.cognates.get(id)
                .map_or(false, |cognate| cognate.len() == distinct.len()),
            None => false,
        }
    }
}

impl<'a, T, S> Clone for CognatesView<'a, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, S> Copy for CognatesView<'a, T, S> {}

impl<'a, 'b, T, S> PartialEq<CognatesView<'b, T, S>> for CognatesView<'a, T, S> where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Two views are equal if they hold the same cognates, compared by their elements.
    fn eq(&self, other: &CognatesView<'b, T, S>) -> bool {
        if self.len() != other.len() {
            return false
        }

        // Cognates are disjoint so any element finds the only possible match.
        self.cognate_set.cognates.iter().all(|(_, cognate)| {
            cognate.iter().next()
                .and_then(|elem| other.cognate_set.index.get(elem))
                .and_then(|&id| other.cognate_set.cognates.get(id))
                .map_or(false, |other_cognate| cognate == other_cognate)
        })
    }
}

impl<'a, T, S> fmt::Debug for CognatesView<'a, T, S> where T: fmt::Debug {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let cognates = self.cognate_set.cognates.iter().map(|(_, cognate)| cognate);

        formatter.debug_list().entries(cognates).finish()
    }
}

impl<'a, T, S> IntoIterator for CognatesView<'a, T, S> where
    T: Clone,
    S: Clone,
{
    type Item = Cow<'a, Cognate<T, S>>;
    type IntoIter = Cognates<'a, T, S>;

    fn into_iter(self) -> Cognates<'a, T, S> {
        self.iter()
    }
}

impl<'a, 'b, T, S> IntoIterator for &'b CognatesView<'a, T, S> where
    T: Clone,
    S: Clone,
{
    type Item = Cow<'a, Cognate<T, S>>;
    type IntoIter = Cognates<'a, T, S>;

    fn into_iter(self) -> Cognates<'a, T, S> {
        self.iter()
    }
}

/// An iterator over the cognates of a `CognateSet`.
///
/// This struct is created by the [`iter`] method on [`CognatesView`].
/// See its documentation for more.
///
/// [`iter`]: struct.CognatesView.html#method.iter
/// [`CognatesView`]: struct.CognatesView.html
pub struct Cognates<'a, T: 'a, S: 'a> {
    slots: slice::Iter<'a, Slot<T, S>>,
    remaining: usize,
    protect: bool,
}

impl<'a, T, S> Iterator for Cognates<'a, T, S> where
    T: Clone,
    S: Clone,
{
    type Item = Cow<'a, Cognate<T, S>>;

    fn next(&mut self) -> Option<Cow<'a, Cognate<T, S>>> {
        let cognate = self.slots.by_ref().find_map(Slot::cognate)?;
        self.remaining -= 1;

        Some(if self.protect {
            Cow::Owned(cognate.clone())
        } else {
            Cow::Borrowed(cognate)
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, S> ExactSizeIterator for Cognates<'a, T, S> where
    T: Clone,
    S: Clone,
{}

impl<'a, T, S> FusedIterator for Cognates<'a, T, S> where
    T: Clone,
    S: Clone,
{}

/// An iterator over mutable references to the cognates stored in a `CognateSet`.
///
/// This struct is created by the [`cognates_unchecked_mut`] method on [`CognateSet<T, S>`].
/// See its documentation for the care this needs.
///
/// [`cognates_unchecked_mut`]: ../cognate_set/struct.CognateSet.html#method.cognates_unchecked_mut
/// [`CognateSet<T, S>`]: ../cognate_set/struct.CognateSet.html
pub struct CognatesMut<'a, T: 'a, S: 'a> {
    slots: slice::IterMut<'a, Slot<T, S>>,
    remaining: usize,
}

impl<'a, T, S> CognatesMut<'a, T, S> {
    #[inline]
    pub(crate) fn new(arena: &'a mut CognateArena<T, S>) -> Self {
        let remaining = arena.len();

        Self {
            slots: arena.slots_mut(),
            remaining,
        }
    }
}

impl<'a, T, S> Iterator for CognatesMut<'a, T, S> {
    type Item = &'a mut Cognate<T, S>;

    fn next(&mut self) -> Option<&'a mut Cognate<T, S>> {
        let cognate = self.slots.by_ref().find_map(Slot::cognate_mut)?;
        self.remaining -= 1;

        Some(cognate)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, S> ExactSizeIterator for CognatesMut<'a, T, S> {}

impl<'a, T, S> FusedIterator for CognatesMut<'a, T, S> {}

/// An iterator that moves the cognates out of a `CognateSet`.
///
/// This struct is created by the `into_iter` method on [`CognateSet<T, S>`].
///
/// [`CognateSet<T, S>`]: ../cognate_set/struct.CognateSet.html
pub struct IntoCognates<T, S> {
    slots: vec::IntoIter<Slot<T, S>>,
    remaining: usize,
}

impl<T, S> IntoCognates<T, S> {
    #[inline]
    pub(crate) fn new(arena: CognateArena<T, S>) -> Self {
        let remaining = arena.len();

        Self {
            slots: arena.into_slots(),
            remaining,
        }
    }
}

impl<T, S> Iterator for IntoCognates<T, S> {
    type Item = Cognate<T, S>;

    fn next(&mut self) -> Option<Cognate<T, S>> {
        let cognate = self.slots.by_ref().find_map(Slot::into_cognate)?;
        self.remaining -= 1;

        Some(cognate)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, S> ExactSizeIterator for IntoCognates<T, S> {}

impl<T, S> FusedIterator for IntoCognates<T, S> {}

#[cfg(test)]
mod tests {
    use crate::CognateSet;
    use std::borrow::Cow;

    fn cognate_set() -> CognateSet<&'static str> {
        let mut cognate_set = CognateSet::new();
        cognate_set.join(vec!["night", "nacht", "noche"]);
        cognate_set.join(vec!["water", "wasser"]);
        cognate_set.join(vec!["eau"]);

        cognate_set
    }

    #[test]
    fn elements_view() {
        let cognate_set = cognate_set();
        let elements = cognate_set.elements();

        assert_eq!(elements.len(), 6);
        assert_eq!(elements.iter().len(), 6);
        assert!(elements.contains("nacht"));
        assert!(!elements.contains("nuit"));

        let mut other = cognate_set.clone();
        other.reorg(vec!["night"]);
        assert_eq!(elements, other.elements());

        other.remove_element("night").unwrap();
        assert_ne!(elements, other.elements());
    }

    #[test]
    fn protected_view_yields_copies() {
        let cognate_set = cognate_set();
        let cognates = cognate_set.cognates();

        assert!(cognates.is_protected());
        assert_eq!(cognates.iter().len(), 3);

        for cognate in &cognates {
            assert!(matches!(cognate, Cow::Owned(_)));
        }
    }

    #[test]
    fn unprotected_view_yields_the_stored_cognates() {
        let cognate_set = cognate_set();
        let cognates = cognate_set.cognates_unprotected();

        assert!(!cognates.is_protected());

        for cognate in &cognates {
            match cognate {
                Cow::Borrowed(cognate) => {
                    let elem = cognate.iter().next().unwrap();
                    let stored = cognate_set.cognate_ref(elem).unwrap();
                    assert!(std::ptr::eq(cognate, stored));
                },
                Cow::Owned(_) => panic!("unprotected views must not copy"),
            }
        }
    }

    #[test]
    fn views_contain_cognates_by_content() {
        let cognate_set = cognate_set();
        let cognates = cognate_set.cognates();

        assert!(cognates.contains(&["wasser", "water"]));
        assert!(cognates.contains(vec!["eau"].iter()));
        assert!(!cognates.contains(&["water"]));
        assert!(!cognates.contains(&["water", "eau"]));
        assert!(!cognates.contains(&["water", "wasser", "aqua"]));
    }

    #[test]
    fn views_compare_by_content() {
        let first = cognate_set();

        let mut second = CognateSet::new();
        second.join(vec!["eau"]);
        second.join(vec!["wasser", "water"]);
        second.join(vec!["noche", "night"]);
        second.join(vec!["nacht", "noche"]);

        assert_eq!(first.cognates(), second.cognates_unprotected());

        second.reorg(vec!["nacht"]);
        assert_ne!(first.cognates(), second.cognates());

        second.join(vec!["nacht", "night"]);
        second.remove_cognate("eau").unwrap();
        second.join(vec!["eau", "water"]);
        assert_ne!(first.cognates(), second.cognates());
    }

    #[test]
    fn into_iter_moves_every_cognate() {
        let cognates: Vec<_> = cognate_set().into_iter().collect();

        assert_eq!(cognates.len(), 3);
        assert_eq!(cognates.iter().map(|cognate| cognate.len()).sum::<usize>(), 6);
    }
}
