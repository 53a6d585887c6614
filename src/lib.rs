//! Growable arrays and a singly-linked list with explicit storage control.
//!
//! `ByteArray` stores fixed-width byte elements with an optional per-element
//! destructor, `Array<T>` is the typed face of the same core, and `List<T>` is a
//! chain of individually owned nodes.

#[macro_use]
mod logging;
mod dontdothis;
mod storage;
mod destructor;
mod raw;
mod capacity;
mod algorithms;
mod info;
mod bytes;
mod array;
mod list;

pub use capacity::{GROWTH_FACTOR, INITIAL_CAPACITY};
pub use destructor::DropFn;
pub use info::ArrayInfo;
pub use bytes::ByteArray;
pub use array::Array;
pub use list::{List, Iter as ListIter, IterMut as ListIterMut};

#[cfg(test)]
pub mod dropflag;
