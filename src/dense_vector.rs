//! A handle-stable array that recycles the slots of removed elements.

use crate::{
	allocator::{self, AllocError, Allocator, Global},
	chunk::{Chunk, HeapChunk, Relocate},
	index::Index,
	push_pool::PushPool,
	remove_chain::{drop_occupied, Link, OccupiedSlots, RemoveChain},
};
use core::{
	fmt::{self, Debug, Formatter},
	iter::FusedIterator,
	marker::PhantomData,
	ops, ptr,
};
use scopeguard::ScopeGuard;
use tap::Tap;

/// An array of `T` addressed through stable [`Index<T>`] handles.
///
/// Removing an element leaves a hole that the next [`push`](`BasicDenseVector::push`) fills again
/// (most recently freed first). Handles of other elements never change, not even when the storage grows.
///
/// Iteration visits occupied slots in ascending slot order.
pub struct BasicDenseVector<T, C: Chunk<T>> {
	pool: PushPool<T, C>,
	chain: RemoveChain,
}

/// A [`BasicDenseVector`] on the heap.
pub type DenseVector<T, A = Global> = BasicDenseVector<T, HeapChunk<T, A>>;

/// Moves only occupied slots during growth.
struct SkipHoles<'a> {
	links: &'a [Link],
}

unsafe impl<T> Relocate<T> for SkipHoles<'_> {
	unsafe fn relocate(&self, src: *const T, dst: *mut T, len: usize) {
		for (slot, link) in self.links[..len].iter().enumerate() {
			if *link == Link::Occupied {
				ptr::copy_nonoverlapping(src.add(slot), dst.add(slot), 1);
			}
		}
	}
}

impl<T> DenseVector<T> {
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
		Self::new().tap_mut(|dense| dense.reserve(capacity))
	}
}

impl<T, C: Chunk<T> + Default> Default for BasicDenseVector<T, C> {
	fn default() -> Self {
		Self::from_chunk(C::default())
	}
}

impl<T, A: Allocator> DenseVector<T, A> {
	/// Creates a new, empty heap-backed instance that allocates through `alloc`.
	pub fn new_in(alloc: A) -> Self {
		Self::from_chunk(HeapChunk::new_in(alloc))
	}
}

impl<T, C: Chunk<T>> BasicDenseVector<T, C> {
	/// Creates a new, empty instance using (and reinitialising) `chunk`'s storage.
	pub fn from_chunk(chunk: C) -> Self {
		Self {
			pool: PushPool::from_chunk(chunk),
			chain: RemoveChain::new(),
		}
	}

	/// Makes sure the next [`push`](`BasicDenseVector::push`) won't need to grow the storage.
	pub(crate) fn prepare_push(&mut self) {
		if self.chain.next_index() == self.pool.len() && self.pool.is_full() {
			self.reserve(self.pool.doubled_capacity());
		}
	}

	/// Stores `value` in the most recently freed slot, or a new one if there's no hole, and returns its handle.
	///
	/// # Panics
	///
	/// Iff the storage can't be grown.
	pub fn push(&mut self, value: T) -> Index<T> {
		self.prepare_push();
		let slot = self.chain.push();
		if slot == self.pool.len() {
			self.pool.push_back(1);
		}
		unsafe { self.pool.chunk_mut().construct(slot, value) };
		Index::new(slot)
	}

	/// Removes and returns the element at `index`.
	///
	/// Returns [`None`] (changing nothing) iff `index` doesn't refer to a live element.
	/// The slot's memory is kept for reuse.
	pub fn remove(&mut self, index: Index<T>) -> Option<T> {
		let slot = index.get();
		self.chain
			.remove(slot)
			.then(|| unsafe { self.pool.chunk_mut().take(slot) })
	}

	/// Whether `index` refers to a live element.
	pub fn contains(&self, index: Index<T>) -> bool {
		self.chain.is_occupied(index.get())
	}

	/// The element at `index`, iff it's live.
	pub fn get(&self, index: Index<T>) -> Option<&T> {
		self.contains(index)
			.then(|| unsafe { self.get_unchecked(index) })
	}

	/// The element at `index`, iff it's live.
	pub fn get_mut(&mut self, index: Index<T>) -> Option<&mut T> {
		if self.contains(index) {
			Some(unsafe { self.get_unchecked_mut(index) })
		} else {
			None
		}
	}

	/// # Safety
	///
	/// `index` must refer to a live element.
	pub unsafe fn get_unchecked(&self, index: Index<T>) -> &T {
		self.pool.chunk().slot(index.get())
	}

	/// # Safety
	///
	/// `index` must refer to a live element.
	pub unsafe fn get_unchecked_mut(&mut self, index: Index<T>) -> &mut T {
		self.pool.chunk_mut().slot_mut(index.get())
	}

	/// The number of live elements.
	pub fn len(&self) -> usize {
		self.chain.len()
	}

	/// Whether there are no live elements.
	pub fn is_empty(&self) -> bool {
		self.chain.is_empty()
	}

	/// The number of slots ever handed out, including holes.
	pub fn full_len(&self) -> usize {
		self.chain.full_len()
	}

	/// Whether there are no holes.
	pub fn is_full(&self) -> bool {
		self.chain.is_full()
	}

	/// The number of slots that fit without growing.
	pub fn capacity(&self) -> usize {
		self.pool.capacity()
	}

	/// The handle the next [`push`](`BasicDenseVector::push`) will return.
	pub fn next_index(&self) -> Index<T> {
		Index::new(self.chain.next_index())
	}

	/// The slot bookkeeping.
	pub fn remove_chain(&self) -> &RemoveChain {
		&self.chain
	}

	/// Grows the capacity to at least `capacity` slots, moving only live elements.
	///
	/// # Panics
	///
	/// Iff the storage can't be obtained.
	pub fn reserve(&mut self, capacity: usize) {
		if let Err(error) = self.try_reserve(capacity) {
			allocator::handle_error(error)
		}
	}

	/// Grows the capacity to at least `capacity` slots, moving only live elements.
	///
	/// # Errors
	///
	/// Iff the storage can't be obtained, in which case this instance is unchanged.
	pub fn try_reserve(&mut self, capacity: usize) -> Result<(), AllocError> {
		let holes = SkipHoles {
			links: self.chain.links(),
		};
		unsafe { self.pool.reserve_move(capacity, &holes) }
	}

	/// Drops all elements and forgets all handles. The storage is kept.
	pub fn clear(&mut self) {
		let base = self.pool.as_mut_ptr();
		unsafe { self.pool.set_len(0) };
		let chain = scopeguard::guard(&mut self.chain, |chain| chain.clear());
		unsafe { drop_occupied(base, chain.links()) }
	}

	/// Iterates over the live elements.
	pub fn iter(&self) -> impl '_ + DoubleEndedIterator<Item = &T> + ExactSizeIterator + FusedIterator {
		self.iter_indexed().map(|(_, value)| value)
	}

	/// Iterates mutably over the live elements.
	pub fn iter_mut(&mut self) -> impl '_ + DoubleEndedIterator<Item = &mut T> + ExactSizeIterator + FusedIterator {
		self.iter_indexed_mut().map(|(_, value)| value)
	}

	/// Iterates over the live elements along with their handles.
	pub fn iter_indexed(&self) -> IterIndexed<'_, T> {
		IterIndexed {
			slots: self.chain.occupied(),
			base: self.pool.as_ptr(),
			_phantom: PhantomData,
		}
	}

	/// Iterates mutably over the live elements along with their handles.
	pub fn iter_indexed_mut(&mut self) -> IterIndexedMut<'_, T> {
		IterIndexedMut {
			slots: self.chain.occupied(),
			base: self.pool.as_mut_ptr(),
			_phantom: PhantomData,
		}
	}
}

impl<T, C: Chunk<T>> Drop for BasicDenseVector<T, C> {
	fn drop(&mut self) {
		unsafe { drop_occupied(self.pool.as_mut_ptr(), self.chain.links()) }
	}
}

impl<T: Clone, C: Chunk<T> + Default> Clone for BasicDenseVector<T, C> {
	fn clone(&self) -> Self {
		let chain = self.chain.clone();
		let mut clone = Self::default().tap_mut(|clone| clone.reserve(self.pool.len()));

		let base = clone.pool.as_mut_ptr();
		let links = self.chain.links();
		let mut written = scopeguard::guard(0, |written| unsafe { drop_occupied(base, &links[..written]) });
		for (index, value) in self.iter_indexed() {
			unsafe { base.add(index.get()).write(value.clone()) };
			*written = index.get() + 1;
		}
		ScopeGuard::into_inner(written);

		unsafe { clone.pool.set_len(self.pool.len()) };
		clone.chain = chain;
		clone
	}
}

impl<T, C: Chunk<T>> ops::Index<Index<T>> for BasicDenseVector<T, C> {
	type Output = T;

	#[track_caller]
	fn index(&self, index: Index<T>) -> &Self::Output {
		match self.get(index) {
			Some(value) => value,
			None => panic!("no element at {index:?}"),
		}
	}
}

impl<T, C: Chunk<T>> ops::IndexMut<Index<T>> for BasicDenseVector<T, C> {
	#[track_caller]
	fn index_mut(&mut self, index: Index<T>) -> &mut Self::Output {
		match self.get_mut(index) {
			Some(value) => value,
			None => panic!("no element at {index:?}"),
		}
	}
}

impl<T: Debug, C: Chunk<T>> Debug for BasicDenseVector<T, C> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_map()
			.entries(self.iter_indexed().map(|(index, value)| (index.get(), value)))
			.finish()
	}
}

impl<T, C: Chunk<T>> Extend<T> for BasicDenseVector<T, C> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for value in iter {
			self.push(value);
		}
	}
}

impl<T, C: Chunk<T> + Default> FromIterator<T> for BasicDenseVector<T, C> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self::default().tap_mut(|dense| dense.extend(iter))
	}
}

/// Iterator over the live elements of a [`BasicDenseVector`] and their handles.
pub struct IterIndexed<'a, T> {
	slots: OccupiedSlots<'a>,
	base: *const T,
	_phantom: PhantomData<&'a T>,
}

impl<'a, T> Iterator for IterIndexed<'a, T> {
	type Item = (Index<T>, &'a T);

	fn next(&mut self) -> Option<Self::Item> {
		let slot = self.slots.next()?;
		Some((Index::new(slot), unsafe { &*self.base.add(slot) }))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.slots.size_hint()
	}
}

impl<T> DoubleEndedIterator for IterIndexed<'_, T> {
	fn next_back(&mut self) -> Option<Self::Item> {
		let slot = self.slots.next_back()?;
		Some((Index::new(slot), unsafe { &*self.base.add(slot) }))
	}
}

impl<T> ExactSizeIterator for IterIndexed<'_, T> {}
impl<T> FusedIterator for IterIndexed<'_, T> {}

impl<T> Clone for IterIndexed<'_, T> {
	fn clone(&self) -> Self {
		Self {
			slots: self.slots.clone(),
			base: self.base,
			_phantom: PhantomData,
		}
	}
}

/// Iterator over the live elements of a [`BasicDenseVector`] and their handles, allowing mutation.
pub struct IterIndexedMut<'a, T> {
	slots: OccupiedSlots<'a>,
	base: *mut T,
	_phantom: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterIndexedMut<'a, T> {
	type Item = (Index<T>, &'a mut T);

	fn next(&mut self) -> Option<Self::Item> {
		// Each slot is visited at most once.
		let slot = self.slots.next()?;
		Some((Index::new(slot), unsafe { &mut *self.base.add(slot) }))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.slots.size_hint()
	}
}

impl<T> DoubleEndedIterator for IterIndexedMut<'_, T> {
	fn next_back(&mut self) -> Option<Self::Item> {
		let slot = self.slots.next_back()?;
		Some((Index::new(slot), unsafe { &mut *self.base.add(slot) }))
	}
}

impl<T> ExactSizeIterator for IterIndexedMut<'_, T> {}
impl<T> FusedIterator for IterIndexedMut<'_, T> {}
