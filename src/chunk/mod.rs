//! Raw, contiguous element storage.
//!
//! A [`Chunk`] only manages memory.
//! It never constructs or drops elements by itself; that's left to the containers built on top of it,
//! which track which slots are live.
//!
//! Three implementations are available:
//!
//! - [`HeapChunk`]: storage from an [`Allocator`](`crate::allocator::Allocator`).
//! - [`InlineChunk`]: a fixed number of slots stored in place.
//! - [`CompactChunk`]: inline slots until those run out, then (once, for good) heap storage.

use crate::allocator::AllocError;
use core::ptr;

mod compact;
mod heap;
mod inline;

pub use compact::CompactChunk;
pub use heap::HeapChunk;
pub use inline::InlineChunk;

/// Raw storage for exactly [`Chunk::capacity`] values of `T`.
///
/// # Safety
///
/// [`Chunk::as_ptr`] and [`Chunk::as_mut_ptr`] must point to storage valid for `capacity()` values of `T`,
/// which stays in place (and keeps its contents) until the next call to a `&mut self` method of this trait other than the pointer getters and the provided slot accessors.
///
/// [`Chunk::reserve_move`] must transfer the requested slots through the given [`Relocate`] policy
/// and must leave the chunk untouched when it returns an error.
pub unsafe trait Chunk<T> {
	/// The number of slots currently available.
	fn capacity(&self) -> usize;

	/// Pointer to the first slot.
	fn as_ptr(&self) -> *const T;

	/// Mutable pointer to the first slot.
	fn as_mut_ptr(&mut self) -> *mut T;

	/// Replaces any storage held by fresh, uninitialised storage for exactly `capacity` slots.
	///
	/// Values still stored in the old storage are abandoned, not dropped.
	///
	/// # Errors
	///
	/// Iff the storage can't be provided, in which case the chunk is unchanged.
	fn allocate(&mut self, capacity: usize) -> Result<(), AllocError>;

	/// Releases the storage held, if any.
	///
	/// Values still stored are abandoned, not dropped.
	fn deallocate(&mut self);

	/// Grows this chunk to at least `capacity` slots, if it's currently smaller.
	///
	/// The slots `0..len` are transferred into the new storage by `relocate`.
	/// Slots `len..capacity` of the result are uninitialised.
	///
	/// This is a no-op if `capacity` doesn't exceed [`Chunk::capacity`].
	///
	/// # Errors
	///
	/// Iff the new storage can't be provided, in which case nothing was moved.
	///
	/// # Safety
	///
	/// `len` must not exceed [`Chunk::capacity`].
	unsafe fn reserve_move<R>(&mut self, len: usize, capacity: usize, relocate: &R) -> Result<(), AllocError>
	where
		R: ?Sized + Relocate<T>;

	/// Moves `value` into `slot`, without dropping anything that may have been there before.
	///
	/// # Safety
	///
	/// `slot` must be less than [`Chunk::capacity`].
	unsafe fn construct(&mut self, slot: usize, value: T) -> &mut T {
		debug_assert!(slot < self.capacity(), "slot {} out of range", slot);
		let target = self.as_mut_ptr().add(slot);
		target.write(value);
		&mut *target
	}

	/// Drops the value in `slot` in place. The storage stays allocated.
	///
	/// # Safety
	///
	/// `slot` must be in range and hold a live value, which is dead afterwards.
	unsafe fn destroy(&mut self, slot: usize) {
		debug_assert!(slot < self.capacity(), "slot {} out of range", slot);
		ptr::drop_in_place(self.as_mut_ptr().add(slot));
	}

	/// Moves the value out of `slot`.
	///
	/// # Safety
	///
	/// `slot` must be in range and hold a live value, which is dead afterwards.
	unsafe fn take(&mut self, slot: usize) -> T {
		debug_assert!(slot < self.capacity(), "slot {} out of range", slot);
		self.as_mut_ptr().add(slot).read()
	}

	/// # Safety
	///
	/// `slot` must be in range and hold a live value.
	unsafe fn slot(&self, slot: usize) -> &T {
		debug_assert!(slot < self.capacity(), "slot {} out of range", slot);
		&*self.as_ptr().add(slot)
	}

	/// # Safety
	///
	/// `slot` must be in range and hold a live value.
	unsafe fn slot_mut(&mut self, slot: usize) -> &mut T {
		debug_assert!(slot < self.capacity(), "slot {} out of range", slot);
		&mut *self.as_mut_ptr().add(slot)
	}
}

/// A policy for transferring slots into new storage during growth.
///
/// # Safety
///
/// Implementations must move (bitwise) every slot of `0..len` that the calling container considers live,
/// to the same offset in the destination, and must not touch any other destination slot.
pub unsafe trait Relocate<T> {
	/// Transfers slots from `src` to `dst`.
	///
	/// # Safety
	///
	/// `src` must be valid for reads and `dst` valid for writes of `len` values of `T`.
	/// The two ranges must not overlap.
	unsafe fn relocate(&self, src: *const T, dst: *mut T, len: usize);
}

/// Moves all slots in one go. Fits containers whose live slots are exactly `0..len`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Contiguous;

unsafe impl<T> Relocate<T> for Contiguous {
	unsafe fn relocate(&self, src: *const T, dst: *mut T, len: usize) {
		ptr::copy_nonoverlapping(src, dst, len);
	}
}
