use crate::{
	allocator::AllocError,
	chunk::{Chunk, Relocate},
};
use core::{
	fmt::{self, Debug, Formatter},
	mem::MaybeUninit,
};

/// [`Chunk`] storage for exactly `N` values, held in place.
///
/// Requests for more than `N` slots fail with [`AllocError::CapacityOverflow`].
pub struct InlineChunk<T, const N: usize> {
	slots: [MaybeUninit<T>; N],
}

impl<T, const N: usize> InlineChunk<T, N> {
	/// Creates a new [`InlineChunk`] with all `N` slots uninitialised.
	#[must_use]
	pub const fn new() -> Self {
		Self {
			// An array of `MaybeUninit` doesn't need initialisation.
			slots: unsafe { MaybeUninit::<[MaybeUninit<T>; N]>::uninit().assume_init() },
		}
	}

	fn check(capacity: usize) -> Result<(), AllocError> {
		if capacity > N {
			Err(AllocError::CapacityOverflow)
		} else {
			Ok(())
		}
	}
}

impl<T, const N: usize> Default for InlineChunk<T, N> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T, const N: usize> Debug for InlineChunk<T, N> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("InlineChunk").field("capacity", &N).finish()
	}
}

unsafe impl<T, const N: usize> Chunk<T> for InlineChunk<T, N> {
	fn capacity(&self) -> usize {
		N
	}

	fn as_ptr(&self) -> *const T {
		self.slots.as_ptr().cast()
	}

	fn as_mut_ptr(&mut self) -> *mut T {
		self.slots.as_mut_ptr().cast()
	}

	fn allocate(&mut self, capacity: usize) -> Result<(), AllocError> {
		Self::check(capacity)
	}

	fn deallocate(&mut self) {}

	unsafe fn reserve_move<R>(&mut self, _len: usize, capacity: usize, _relocate: &R) -> Result<(), AllocError>
	where
		R: ?Sized + Relocate<T>,
	{
		Self::check(capacity)
	}
}
