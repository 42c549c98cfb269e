//! Handle-stable pooled containers over swappable memory chunks.
//!
//! Every container here is built from the same few layers:
//!
//! - a [`Chunk`](`chunk::Chunk`) provides raw slots (on the heap, inline or both),
//! - a [`PushPool`] tracks how many of them are in use,
//! - and the container decides what "in use" means.
//!
//! [`Vector`] keeps its elements packed in order.
//! [`DenseVector`] and [`SparseVector`] hand out [`Index`] handles that survive removal of other elements and growth.
//! [`Set`] and [`Map`] chain the slots of a [`DenseVector`] into hash buckets, so their handles are just as stable.
//!
//! # Panic Safety
//!
//! Destructors of stored values may panic: the containers stay sound and drop the remaining values.
//! Without the `"std"` feature, a second panic during such a teardown aborts.
//! With it, panics are caught per value and the first one resumes once everything is dropped.
#![no_std]
#![doc(html_root_url = "https://docs.rs/keel/0.0.1")]
#![warn(clippy::pedantic, missing_docs)]
#![allow(clippy::semicolon_if_nothing_returned)]

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
mod readme {}

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod allocator;
pub mod bucket_vector;
pub mod chunk;
pub mod dense_vector;
pub mod hash;
pub mod index;
pub mod map;
pub mod push_pool;
pub mod remove_chain;
pub mod set;
pub mod sparse_set;
pub mod sparse_vector;
pub mod vector;

pub use allocator::AllocError;
pub use dense_vector::{BasicDenseVector, DenseVector};
pub use index::Index;
pub use map::Map;
pub use push_pool::PushPool;
pub use remove_chain::{RemoveChain, SlotState};
pub use set::{Set, SetConfig};
pub use sparse_set::SparseSet;
pub use sparse_vector::SparseVector;
pub use vector::{BasicVector, CompactVector, InlineVector, Vector};
