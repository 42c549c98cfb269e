use crate::{
	allocator::{AllocError, Allocator, Global},
	chunk::{Chunk, Relocate},
};
use core::{
	alloc::Layout,
	fmt::{self, Debug, Formatter},
	marker::PhantomData,
	ptr::NonNull,
};

/// [`Chunk`] storage obtained from an [`Allocator`].
///
/// Dropping a [`HeapChunk`] releases its storage without dropping any values in it.
pub struct HeapChunk<T, A: Allocator = Global> {
	ptr: NonNull<T>,
	capacity: usize,
	alloc: A,
	_owns: PhantomData<T>,
}

unsafe impl<T: Send, A: Allocator + Send> Send for HeapChunk<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for HeapChunk<T, A> {}

impl<T> HeapChunk<T> {
	/// Creates a new [`HeapChunk`] without storage, using the [`Global`] allocator.
	#[must_use]
	pub const fn new() -> Self {
		Self::new_in(Global)
	}
}

impl<T, A: Allocator> HeapChunk<T, A> {
	/// Creates a new [`HeapChunk`] without storage that will allocate through `alloc`.
	pub const fn new_in(alloc: A) -> Self {
		Self {
			ptr: NonNull::dangling(),
			capacity: 0,
			alloc,
			_owns: PhantomData,
		}
	}

	/// The allocator capability in use.
	pub fn allocator(&self) -> &A {
		&self.alloc
	}

	fn obtain(&self, capacity: usize) -> Result<NonNull<T>, AllocError> {
		let layout = Layout::array::<T>(capacity).map_err(|_| AllocError::CapacityOverflow)?;
		self.alloc.allocate(layout).map(NonNull::cast)
	}

	fn release(&mut self) {
		if self.capacity == 0 {
			return;
		}
		if let Ok(layout) = Layout::array::<T>(self.capacity) {
			unsafe { self.alloc.deallocate(self.ptr.cast(), layout) }
		}
		self.ptr = NonNull::dangling();
		self.capacity = 0;
	}
}

impl<T, A: Allocator + Default> Default for HeapChunk<T, A> {
	fn default() -> Self {
		Self::new_in(A::default())
	}
}

impl<T, A: Allocator> Drop for HeapChunk<T, A> {
	fn drop(&mut self) {
		self.release()
	}
}

impl<T, A: Allocator> Debug for HeapChunk<T, A> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("HeapChunk")
			.field("ptr", &self.ptr)
			.field("capacity", &self.capacity)
			.finish_non_exhaustive()
	}
}

unsafe impl<T, A: Allocator> Chunk<T> for HeapChunk<T, A> {
	fn capacity(&self) -> usize {
		self.capacity
	}

	fn as_ptr(&self) -> *const T {
		self.ptr.as_ptr()
	}

	fn as_mut_ptr(&mut self) -> *mut T {
		self.ptr.as_ptr()
	}

	fn allocate(&mut self, capacity: usize) -> Result<(), AllocError> {
		let ptr = self.obtain(capacity)?;
		self.release();
		self.ptr = ptr;
		self.capacity = capacity;
		Ok(())
	}

	fn deallocate(&mut self) {
		self.release()
	}

	unsafe fn reserve_move<R>(&mut self, len: usize, capacity: usize, relocate: &R) -> Result<(), AllocError>
	where
		R: ?Sized + Relocate<T>,
	{
		if capacity <= self.capacity {
			return Ok(());
		}
		debug_assert!(len <= self.capacity);

		let ptr = self.obtain(capacity)?;
		relocate.relocate(self.ptr.as_ptr(), ptr.as_ptr(), len);
		self.release();
		self.ptr = ptr;
		self.capacity = capacity;
		Ok(())
	}
}
