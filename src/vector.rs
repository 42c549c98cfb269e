//! A growable array over any [`Chunk`].

use crate::{
	allocator::{self, AllocError, Allocator, Global},
	chunk::{Chunk, CompactChunk, Contiguous, HeapChunk, InlineChunk},
	push_pool::PushPool,
};
use core::{
	fmt::{self, Debug, Formatter},
	ops::{Deref, DerefMut},
	ptr, slice,
};
use tap::Tap;

/// A growable array storing its elements in a [`Chunk`].
///
/// Elements always occupy exactly the slots `0..len()`.
/// Positions shift on insertion and removal, so there's no handle stability: use
/// [`DenseVector`](`crate::DenseVector`) or [`SparseVector`](`crate::SparseVector`) for that.
pub struct BasicVector<T, C: Chunk<T>> {
	pool: PushPool<T, C>,
}

/// A [`BasicVector`] on the heap.
pub type Vector<T, A = Global> = BasicVector<T, HeapChunk<T, A>>;

/// A [`BasicVector`] that can hold at most `N` elements, stored in place.
pub type InlineVector<T, const N: usize> = BasicVector<T, InlineChunk<T, N>>;

/// A [`BasicVector`] that stores up to `N` elements in place before moving to the heap.
pub type CompactVector<T, const N: usize, A = Global> = BasicVector<T, CompactChunk<T, N, A>>;

impl<T> Vector<T> {
	/// Creates a new, empty instance. Nothing is allocated until needed.
	#[must_use]
	pub fn new() -> Self {
		Self::from_chunk(HeapChunk::new())
	}

	/// Creates a new, empty instance with room for at least `capacity` elements.
	///
	/// # Panics
	///
	/// Iff the storage can't be obtained.
	#[must_use]
	pub fn with_capacity(capacity: usize) -> Self {
		Self::new().tap_mut(|vector| vector.reserve(capacity))
	}
}

impl<T, A: Allocator> Vector<T, A> {
	/// Creates a new, empty instance that allocates through `alloc`.
	pub fn new_in(alloc: A) -> Self {
		Self::from_chunk(HeapChunk::new_in(alloc))
	}
}

impl<T, const N: usize> InlineVector<T, N> {
	/// Creates a new, empty instance.
	#[must_use]
	pub fn new() -> Self {
		Self::from_chunk(InlineChunk::new())
	}
}

impl<T, const N: usize> CompactVector<T, N> {
	/// Creates a new, empty instance storing its first `N` elements in place.
	#[must_use]
	pub fn new() -> Self {
		Self::from_chunk(CompactChunk::new())
	}
}

impl<T, C: Chunk<T> + Default> Default for BasicVector<T, C> {
	fn default() -> Self {
		Self::from_chunk(C::default())
	}
}

impl<T, C: Chunk<T>> BasicVector<T, C> {
	/// Creates a new, empty instance using (and reinitialising) `chunk`'s storage.
	pub fn from_chunk(chunk: C) -> Self {
		Self {
			pool: PushPool::from_chunk(chunk),
		}
	}

	/// The number of elements.
	pub fn len(&self) -> usize {
		self.pool.len()
	}

	/// Whether there are no elements.
	pub fn is_empty(&self) -> bool {
		self.pool.is_empty()
	}

	/// The number of elements that fit without growing.
	pub fn capacity(&self) -> usize {
		self.pool.capacity()
	}

	/// The elements, in order.
	pub fn as_slice(&self) -> &[T] {
		unsafe { slice::from_raw_parts(self.pool.as_ptr(), self.pool.len()) }
	}

	/// The elements, in order.
	pub fn as_mut_slice(&mut self) -> &mut [T] {
		unsafe { slice::from_raw_parts_mut(self.pool.as_mut_ptr(), self.pool.len()) }
	}

	/// Grows the capacity to at least `capacity`. Does nothing if it's already large enough.
	///
	/// # Panics
	///
	/// Iff the storage can't be obtained.
	pub fn reserve(&mut self, capacity: usize) {
		if let Err(error) = self.try_reserve(capacity) {
			allocator::handle_error(error)
		}
	}

	/// Grows the capacity to at least `capacity`. Does nothing if it's already large enough.
	///
	/// # Errors
	///
	/// Iff the storage can't be obtained, in which case this instance is unchanged.
	pub fn try_reserve(&mut self, capacity: usize) -> Result<(), AllocError> {
		unsafe { self.pool.reserve_move(capacity, &Contiguous) }
	}

	fn grow_if_full(&mut self) {
		if self.pool.is_full() {
			self.reserve(self.pool.doubled_capacity());
		}
	}

	/// Appends `value`, doubling the capacity first if there's no room.
	///
	/// # Panics
	///
	/// Iff the storage can't be grown.
	pub fn push(&mut self, value: T) -> &mut T {
		self.grow_if_full();
		let slot = self.pool.push_back(1);
		unsafe { self.pool.chunk_mut().construct(slot, value) }
	}

	/// Removes and returns the last element, iff there is one.
	pub fn pop(&mut self) -> Option<T> {
		if self.is_empty() {
			return None;
		}
		let slot = self.pool.pop_back(1);
		Some(unsafe { self.pool.chunk_mut().take(slot) })
	}

	/// Inserts `value` at `index`, shifting all later elements one slot to the right.
	///
	/// # Panics
	///
	/// Iff `index > len()`, or if the storage can't be grown.
	pub fn insert(&mut self, index: usize, value: T) -> &mut T {
		let len = self.len();
		assert!(index <= len, "insertion index (is {index}) should be <= len (is {len})");

		self.grow_if_full();
		unsafe {
			let hole = self.pool.as_mut_ptr().add(index);
			ptr::copy(hole, hole.add(1), len - index);
			hole.write(value);
			self.pool.push_back(1);
			&mut *hole
		}
	}

	/// Removes `count` elements starting at `index`, without preserving order.
	///
	/// Only `min(count, len() - index - count)` trailing elements are moved into the gap.
	///
	/// # Panics
	///
	/// Iff `index + count > len()`.
	pub fn remove(&mut self, index: usize, count: usize) {
		let tail = self.check_range(index, count);
		self.remove_move(index, count, count.min(tail))
	}

	/// Removes `count` elements starting at `index`, shifting all later elements to the left.
	///
	/// # Panics
	///
	/// Iff `index + count > len()`.
	pub fn remove_ordered(&mut self, index: usize, count: usize) {
		let tail = self.check_range(index, count);
		self.remove_move(index, count, tail)
	}

	/// Removes and returns the element at `index`, moving the last element into its place.
	///
	/// # Panics
	///
	/// Iff `index >= len()`.
	pub fn swap_remove(&mut self, index: usize) -> T {
		let len = self.len();
		assert!(index < len, "removal index (is {index}) should be < len (is {len})");

		unsafe {
			let base = self.pool.as_mut_ptr();
			let value = base.add(index).read();
			ptr::copy(base.add(len - 1), base.add(index), 1);
			self.pool.pop_back(1);
			value
		}
	}

	/// Shortens this instance to `len` elements, dropping the rest. Does nothing if it's already short enough.
	pub fn truncate(&mut self, len: usize) {
		let old_len = self.len();
		if len >= old_len {
			return;
		}
		unsafe {
			self.pool.set_len(len);
			let base = self.pool.as_mut_ptr();
			ptr::drop_in_place(slice::from_raw_parts_mut(base.add(len), old_len - len));
		}
	}

	/// Drops all elements. The storage is kept.
	pub fn clear(&mut self) {
		self.truncate(0)
	}

	fn check_range(&self, index: usize, count: usize) -> usize {
		let len = self.len();
		let end = index.checked_add(count).filter(|&end| end <= len);
		match end {
			Some(end) => len - end,
			None => panic!("removal range {index}..{index}+{count} out of bounds for len {len}"),
		}
	}

	/// Drops `index..index + count`, then fills the gap with the last `moved` elements.
	fn remove_move(&mut self, index: usize, count: usize, moved: usize) {
		let len = self.len();
		unsafe {
			self.pool.set_len(index);
			let base = self.pool.as_mut_ptr();

			// Runs even if a destructor panics, so the survivors stay reachable.
			let _close_gap = scopeguard::guard(&mut self.pool, move |pool| {
				let base = pool.as_mut_ptr();
				ptr::copy(base.add(len - moved), base.add(index), moved);
				pool.set_len(len - count);
			});
			ptr::drop_in_place(slice::from_raw_parts_mut(base.add(index), count));
		}
	}
}

impl<T: Clone, C: Chunk<T>> BasicVector<T, C> {
	/// Resizes this instance to `len` elements.
	///
	/// Shrinking drops the trailing elements; growing fills the new slots with clones of `value`.
	///
	/// # Panics
	///
	/// Iff the storage can't be grown.
	pub fn resize(&mut self, len: usize, value: T) {
		let old_len = self.len();
		if len <= old_len {
			return self.truncate(len);
		}

		self.reserve(len);
		// The length is only committed per constructed clone, in case `clone` panics.
		for _ in old_len + 1..len {
			let slot = self.pool.len();
			unsafe { self.pool.chunk_mut().construct(slot, value.clone()) };
			self.pool.push_back(1);
		}
		let slot = self.pool.push_back(1);
		unsafe { self.pool.chunk_mut().construct(slot, value) };
	}
}

impl<T, C: Chunk<T>> Drop for BasicVector<T, C> {
	fn drop(&mut self) {
		unsafe { ptr::drop_in_place(self.as_mut_slice()) }
	}
}

impl<T, C: Chunk<T>> Deref for BasicVector<T, C> {
	type Target = [T];

	fn deref(&self) -> &Self::Target {
		self.as_slice()
	}
}

impl<T, C: Chunk<T>> DerefMut for BasicVector<T, C> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		self.as_mut_slice()
	}
}

impl<T: Clone, C: Chunk<T> + Default> Clone for BasicVector<T, C> {
	fn clone(&self) -> Self {
		Self::default().tap_mut(|clone| {
			clone.reserve(self.len());
			clone.extend(self.iter().cloned());
		})
	}
}

impl<T: Debug, C: Chunk<T>> Debug for BasicVector<T, C> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

impl<T: PartialEq, C: Chunk<T>, D: Chunk<T>> PartialEq<BasicVector<T, D>> for BasicVector<T, C> {
	fn eq(&self, other: &BasicVector<T, D>) -> bool {
		self.as_slice() == other.as_slice()
	}
}
impl<T: Eq, C: Chunk<T>> Eq for BasicVector<T, C> {}

impl<T: PartialEq, C: Chunk<T>> PartialEq<[T]> for BasicVector<T, C> {
	fn eq(&self, other: &[T]) -> bool {
		self.as_slice() == other
	}
}

impl<T, C: Chunk<T>> Extend<T> for BasicVector<T, C> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for value in iter {
			self.push(value);
		}
	}
}

impl<T, C: Chunk<T> + Default> FromIterator<T> for BasicVector<T, C> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self::default().tap_mut(|vector| vector.extend(iter))
	}
}

impl<'a, T, C: Chunk<T>> IntoIterator for &'a BasicVector<T, C> {
	type Item = &'a T;
	type IntoIter = slice::Iter<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a, T, C: Chunk<T>> IntoIterator for &'a mut BasicVector<T, C> {
	type Item = &'a mut T;
	type IntoIter = slice::IterMut<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter_mut()
	}
}
