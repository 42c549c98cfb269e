//! A [`Chunk`] with a logical length.

use crate::{
	allocator::{self, AllocError},
	chunk::{Chunk, Relocate},
};
use core::marker::PhantomData;

/// Wraps a [`Chunk`] and tracks how many of its leading slots are in use.
///
/// Pushing and popping only move the length, in O(1) and without shifting anything.
/// What "in use" means (all of `0..len` live, or some of them holes) is up to the container on top.
#[derive(Debug)]
pub struct PushPool<T, C: Chunk<T>> {
	chunk: C,
	len: usize,
	_phantom: PhantomData<T>,
}

impl<T, C: Chunk<T> + Default> Default for PushPool<T, C> {
	fn default() -> Self {
		Self::from_chunk(C::default())
	}
}

impl<T, C: Chunk<T>> PushPool<T, C> {
	/// Wraps `chunk` with a length of zero.
	pub fn from_chunk(chunk: C) -> Self {
		Self {
			chunk,
			len: 0,
			_phantom: PhantomData,
		}
	}

	/// The number of slots in use.
	pub fn len(&self) -> usize {
		self.len
	}

	/// Whether no slots are in use.
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// The number of slots available in total.
	pub fn capacity(&self) -> usize {
		self.chunk.capacity()
	}

	/// Whether every slot is in use.
	pub fn is_full(&self) -> bool {
		self.len == self.chunk.capacity()
	}

	/// The capacity to grow to once full: twice the current one, but at least 1.
	///
	/// # Panics
	///
	/// Iff that overflows.
	pub fn doubled_capacity(&self) -> usize {
		match self.capacity().checked_mul(2) {
			Some(capacity) => capacity.max(1),
			None => allocator::handle_error(AllocError::CapacityOverflow),
		}
	}

	/// Marks `count` more slots as used and returns the first of them.
	///
	/// Nothing is constructed.
	pub fn push_back(&mut self, count: usize) -> usize {
		let start = self.len;
		debug_assert!(count <= self.capacity() - start, "push past capacity");
		self.len += count;
		start
	}

	/// Marks the last `count` used slots as unused and returns the new length.
	///
	/// Nothing is dropped.
	pub fn pop_back(&mut self, count: usize) -> usize {
		debug_assert!(count <= self.len, "pop past start");
		self.len -= count;
		self.len
	}

	/// # Safety
	///
	/// `len` must not exceed [`PushPool::capacity`].
	pub unsafe fn set_len(&mut self, len: usize) {
		debug_assert!(len <= self.capacity());
		self.len = len;
	}

	/// Grows the underlying chunk to at least `capacity` slots, transferring the used ones through `relocate`.
	///
	/// # Errors
	///
	/// Iff the storage can't be provided, in which case nothing changed.
	///
	/// # Safety
	///
	/// `relocate` must be correct for the current contents of the used slots.
	pub unsafe fn reserve_move<R>(&mut self, capacity: usize, relocate: &R) -> Result<(), AllocError>
	where
		R: ?Sized + Relocate<T>,
	{
		self.chunk.reserve_move(self.len, capacity, relocate)
	}

	/// Releases the chunk's storage and resets the length.
	///
	/// Live values are abandoned, not dropped.
	pub fn deallocate(&mut self) {
		self.chunk.deallocate();
		self.len = 0;
	}

	/// The underlying chunk.
	pub fn chunk(&self) -> &C {
		&self.chunk
	}

	/// # Safety
	///
	/// The chunk must not be reallocated such that it becomes smaller than [`PushPool::len`].
	pub unsafe fn chunk_mut(&mut self) -> &mut C {
		&mut self.chunk
	}

	/// Pointer to the first slot.
	pub fn as_ptr(&self) -> *const T {
		self.chunk.as_ptr()
	}

	/// Mutable pointer to the first slot.
	pub fn as_mut_ptr(&mut self) -> *mut T {
		self.chunk.as_mut_ptr()
	}
}
