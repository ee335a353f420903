use crate::cognate_sets::cognate::Cognate;

/// A handle to a cognate stored in a `CognateArena`.
///
/// Two cognates are the same cognate if and only if they have the same handle,
/// even when their contents are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct CognateId(usize);

impl CognateId {
    /// Return the slot this handle points to.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A slot of the `CognateArena`.
#[derive(Clone, Debug)]
pub(crate) struct Slot<T, S> {
    /// The cognate stored here, `None` if the slot is free.
    cognate: Option<Cognate<T, S>>,
    /// The next free slot or `!0` if this is the last one.
    /// Only meaningful while the slot is free.
    next_free: usize,
}

impl<T, S> Slot<T, S> {
    #[inline]
    pub(crate) fn cognate(&self) -> Option<&Cognate<T, S>> {
        self.cognate.as_ref()
    }

    #[inline]
    pub(crate) fn cognate_mut(&mut self) -> Option<&mut Cognate<T, S>> {
        self.cognate.as_mut()
    }

    #[inline]
    pub(crate) fn into_cognate(self) -> Option<Cognate<T, S>> {
        self.cognate
    }
}

/// The owner of every live cognate of a `CognateSet`.
///
/// Freed slots form a linked list and are reused before new slots are pushed.
#[derive(Clone, Debug)]
pub(crate) struct CognateArena<T, S> {
    slots: Vec<Slot<T, S>>,
    /// The most recently freed slot or `!0` if there is none.
    last_removed: usize,
    /// The amount of slots holding a cognate.
    len: usize,
}

impl<T, S> CognateArena<T, S> {
    /// Create an empty `CognateArena`.
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty `CognateArena` with room for `capacity` cognates.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            last_removed: !0,
            len: 0,
        }
    }

    /// Store `cognate` and return its new handle.
    pub(crate) fn insert(&mut self, cognate: Cognate<T, S>) -> CognateId {
        self.len += 1;

        if self.last_removed == !0 {
            self.slots.push(Slot {
                cognate: Some(cognate),
                next_free: !0,
            });

            CognateId(self.slots.len() - 1)
        } else {
            let index = self.last_removed;
            let slot = &mut self.slots[index];
            self.last_removed = slot.next_free;
            slot.cognate = Some(cognate);

            CognateId(index)
        }
    }

    /// Take the cognate out of the arena, freeing its slot.
    pub(crate) fn remove(&mut self, id: CognateId) -> Option<Cognate<T, S>> {
        let slot = self.slots.get_mut(id.0)?;
        let cognate = slot.cognate.take()?;

        slot.next_free = self.last_removed;
        self.last_removed = id.0;
        self.len -= 1;

        Some(cognate)
    }

    #[inline]
    pub(crate) fn get(&self, id: CognateId) -> Option<&Cognate<T, S>> {
        self.slots.get(id.0)?.cognate.as_ref()
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: CognateId) -> Option<&mut Cognate<T, S>> {
        self.slots.get_mut(id.0)?.cognate.as_mut()
    }

    /// The handle of the live cognate in the highest slot.
    pub(crate) fn last_id(&self) -> Option<CognateId> {
        self.slots.iter().rposition(|slot| slot.cognate.is_some()).map(CognateId)
    }

    /// Return the amount of live cognates.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Return the amount of slots, live or free.
    /// Every handle has an index below this.
    #[inline]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[inline]
    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    /// Drop the free slots at the end and release unused memory.
    pub(crate) fn shrink_to_fit(&mut self) {
        let live = self.last_id().map_or(0, |id| id.0 + 1);

        if live < self.slots.len() {
            self.slots.truncate(live);

            // The free list may point past the end now so we rebuild it.
            self.last_removed = !0;
            for index in (0 .. live).rev() {
                if self.slots[index].cognate.is_none() {
                    self.slots[index].next_free = self.last_removed;
                    self.last_removed = index;
                }
            }
        }

        self.slots.shrink_to_fit();
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.last_removed = !0;
        self.len = 0;
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (CognateId, &Cognate<T, S>)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.cognate.as_ref().map(|cognate| (CognateId(index), cognate))
        })
    }

    #[inline]
    pub(crate) fn slots(&self) -> std::slice::Iter<'_, Slot<T, S>> {
        self.slots.iter()
    }

    #[inline]
    pub(crate) fn slots_mut(&mut self) -> std::slice::IterMut<'_, Slot<T, S>> {
        self.slots.iter_mut()
    }

    #[inline]
    pub(crate) fn into_slots(self) -> std::vec::IntoIter<Slot<T, S>> {
        self.slots.into_iter()
    }
}
