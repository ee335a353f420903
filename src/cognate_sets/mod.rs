//! Contains the partition of elements in cognates and the views on it.

mod arena;
pub mod cognate;
pub mod cognate_set;
pub mod views;
