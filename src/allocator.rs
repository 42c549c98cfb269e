//! The allocator capability used by heap-backed chunks.

use alloc::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use core::{
	fmt::{self, Display, Formatter},
	ptr::{self, NonNull},
};

/// Raw memory provider for [`HeapChunk`](`crate::chunk::HeapChunk`) and friends.
///
/// # Safety
///
/// A successful [`Allocator::allocate`] must return memory that is valid for reads and writes of `layout.size()` bytes
/// and aligned to `layout.align()`, and that stays valid until passed to [`Allocator::deallocate`] with the same layout.
///
/// Zero-sized layouts must be supported and may return a dangling, well-aligned pointer.
pub unsafe trait Allocator {
	/// Obtains a block fitting `layout`.
	///
	/// # Errors
	///
	/// Iff the memory could not be provided.
	fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

	/// Returns a block obtained from [`Allocator::allocate`] with the same `layout`.
	///
	/// # Safety
	///
	/// `ptr` must currently be allocated by this allocator with exactly `layout`.
	unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The global allocator of the [`alloc`](`::alloc`) crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Global;

unsafe impl Allocator for Global {
	fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
		if layout.size() == 0 {
			// Any non-null address aligned for `layout` will do. It's never dereferenced.
			return Ok(unsafe { NonNull::new_unchecked(ptr::null_mut::<u8>().wrapping_add(layout.align())) });
		}
		NonNull::new(unsafe { alloc(layout) }).ok_or(AllocError::OutOfMemory(layout))
	}

	unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
		if layout.size() != 0 {
			dealloc(ptr.as_ptr(), layout);
		}
	}
}

unsafe impl<A: Allocator + ?Sized> Allocator for &A {
	fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
		(**self).allocate(layout)
	}

	unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
		(**self).deallocate(ptr, layout);
	}
}

/// Why storage could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
	/// The requested element count doesn't fit the address space or a fixed-capacity chunk.
	CapacityOverflow,
	/// The allocator capability couldn't provide a block of this layout.
	OutOfMemory(Layout),
}

impl Display for AllocError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			AllocError::CapacityOverflow => f.write_str("capacity overflow"),
			AllocError::OutOfMemory(layout) => write!(
				f,
				"out of memory allocating {} bytes aligned to {}",
				layout.size(),
				layout.align()
			),
		}
	}
}

#[cfg(feature = "std")]
impl std::error::Error for AllocError {}

/// Turns a failed infallible growth into the appropriate fatal condition.
#[cold]
#[track_caller]
pub(crate) fn handle_error(error: AllocError) -> ! {
	match error {
		AllocError::CapacityOverflow => panic!("capacity overflow"),
		AllocError::OutOfMemory(layout) => handle_alloc_error(layout),
	}
}
