//! A partition of hashable elements in disjoint cognates that can be inspected as sets.
//!
//! The main struct of this crate is [`CognateSet<T>`] which divides its elements in cognates.
//! Every element belongs to exactly one cognate and every cognate holds at least one element.
//! Cognates are merged with the `join` method, which works like the union of a
//! [disjoint-sets/union-find] structure but keeps the members of each cognate at hand.
//! Unlike a union-find structure elements can also be split out of their cognate with the
//! `reorg` method, and removed with `remove_element`.
//!
//! The cognates can be read through copies with the `cognate` and `cognates` methods.
//! Changing such a copy never changes the [`CognateSet<T>`].
//! Methods ending in `unprotected` or `unchecked_mut` give access to the cognates as they are
//! stored instead.
//!
//! ```
//! use cognates::CognateSet;
//!
//! let mut cognate_set = CognateSet::new();
//! cognate_set.join(vec!["night", "nacht"]);
//! cognate_set.join(vec!["nacht", "noche"]);
//! cognate_set.join(vec!["water", "wasser"]);
//!
//! assert!(cognate_set.same_cognate("night", "noche"));
//! assert!(cognate_set.amount_of_cognates() == 2);
//! ```
//!
//! Two optional features are enabled by default.
//! With `rayon` a [`CognateSet<T>`] can be collected from a parallel iterator and with
//! `proptest` it implements `Arbitrary`.
//!
//! [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
//! [`CognateSet<T>`]: cognate_sets/cognate_set/struct.CognateSet.html

/// A convenient macro to create a `BitVec` similar to `vec![elem; len]`.
macro_rules! bit_vec {
    ($element: expr; $len: expr) => {
        bit_vec::BitVec::from_elem($len, $element)
    };
}

pub mod cognate_sets;
pub mod error;

pub use cognate_sets::{
    cognate::Cognate,
    cognate_set::CognateSet,
    views::{Cognates, CognatesMut, CognatesView, Elements, ElementsView, IntoCognates},
};
pub use error::{CognateError, Result, TransferError};
