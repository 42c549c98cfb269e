use crate::{
	allocator::{AllocError, Allocator, Global},
	chunk::{Chunk, HeapChunk, InlineChunk, Relocate},
};
use core::fmt::{self, Debug, Formatter};

/// [`Chunk`] storage that keeps up to `N` values in place and switches to heap storage beyond that.
///
/// The switch only ever happens heap-ward: once spilled, a [`CompactChunk`] keeps its heap storage
/// even if the container using it shrinks again, so sizes oscillating around `N` don't cause repeated allocations.
/// Only [`Chunk::deallocate`] (or [`Chunk::allocate`] with at most `N` slots) returns to inline storage.
pub struct CompactChunk<T, const N: usize, A: Allocator = Global> {
	storage: Storage<T, N, A>,
	alloc: A,
}

enum Storage<T, const N: usize, A: Allocator> {
	Inline(InlineChunk<T, N>),
	Heap(HeapChunk<T, A>),
}

impl<T, const N: usize> CompactChunk<T, N> {
	/// Creates a new [`CompactChunk`] using inline storage and spilling into the [`Global`] allocator.
	#[must_use]
	pub const fn new() -> Self {
		Self::new_in(Global)
	}
}

impl<T, const N: usize, A: Allocator> CompactChunk<T, N, A> {
	/// Creates a new [`CompactChunk`] using inline storage and spilling into `alloc`.
	pub const fn new_in(alloc: A) -> Self {
		Self {
			storage: Storage::Inline(InlineChunk::new()),
			alloc,
		}
	}

	/// Whether the slots are currently stored in place.
	pub fn is_inline(&self) -> bool {
		matches!(self.storage, Storage::Inline(_))
	}
}

impl<T, const N: usize, A: Allocator + Clone> CompactChunk<T, N, A> {
	fn heap(&self, capacity: usize) -> Result<HeapChunk<T, A>, AllocError> {
		let mut heap = HeapChunk::new_in(self.alloc.clone());
		heap.allocate(capacity)?;
		Ok(heap)
	}
}

impl<T, const N: usize, A: Allocator + Default> Default for CompactChunk<T, N, A> {
	fn default() -> Self {
		Self::new_in(A::default())
	}
}

impl<T, const N: usize, A: Allocator> Debug for CompactChunk<T, N, A> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match &self.storage {
			Storage::Inline(inline) => f.debug_tuple("CompactChunk::Inline").field(inline).finish(),
			Storage::Heap(heap) => f.debug_tuple("CompactChunk::Heap").field(heap).finish(),
		}
	}
}

unsafe impl<T, const N: usize, A: Allocator + Clone> Chunk<T> for CompactChunk<T, N, A> {
	fn capacity(&self) -> usize {
		match &self.storage {
			Storage::Inline(inline) => inline.capacity(),
			Storage::Heap(heap) => heap.capacity(),
		}
	}

	fn as_ptr(&self) -> *const T {
		match &self.storage {
			Storage::Inline(inline) => inline.as_ptr(),
			Storage::Heap(heap) => heap.as_ptr(),
		}
	}

	fn as_mut_ptr(&mut self) -> *mut T {
		match &mut self.storage {
			Storage::Inline(inline) => inline.as_mut_ptr(),
			Storage::Heap(heap) => heap.as_mut_ptr(),
		}
	}

	fn allocate(&mut self, capacity: usize) -> Result<(), AllocError> {
		self.storage = if capacity <= N {
			Storage::Inline(InlineChunk::new())
		} else {
			Storage::Heap(self.heap(capacity)?)
		};
		Ok(())
	}

	fn deallocate(&mut self) {
		self.storage = Storage::Inline(InlineChunk::new());
	}

	unsafe fn reserve_move<R>(&mut self, len: usize, capacity: usize, relocate: &R) -> Result<(), AllocError>
	where
		R: ?Sized + Relocate<T>,
	{
		if capacity <= self.capacity() {
			return Ok(());
		}
		if let Storage::Heap(heap) = &mut self.storage {
			return heap.reserve_move(len, capacity, relocate);
		}

		let mut heap = self.heap(capacity)?;
		relocate.relocate(self.as_ptr(), heap.as_mut_ptr(), len);
		self.storage = Storage::Heap(heap);
		Ok(())
	}
}
