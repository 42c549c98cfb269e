use core::{alloc::Layout, cell::Cell, ptr::NonNull};
use keel::{
	allocator::{Allocator, Global},
	AllocError, DenseVector, Vector,
};

/// Grants a fixed number of allocations, then reports exhaustion.
struct Budget {
	remaining: Cell<usize>,
}

impl Budget {
	fn new(allocations: usize) -> Self {
		Self {
			remaining: Cell::new(allocations),
		}
	}
}

unsafe impl Allocator for Budget {
	fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
		match self.remaining.get() {
			0 => Err(AllocError::OutOfMemory(layout)),
			remaining => {
				self.remaining.set(remaining - 1);
				Global.allocate(layout)
			}
		}
	}

	unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
		Global.deallocate(ptr, layout);
	}
}

#[test]
fn failed_vector_growth_changes_nothing() {
	let budget = Budget::new(1);
	let mut vector = Vector::new_in(&budget);
	vector.try_reserve(4).unwrap();
	vector.extend([1_u32, 2, 3]);

	assert_eq!(
		vector.try_reserve(100),
		Err(AllocError::OutOfMemory(Layout::array::<u32>(100).unwrap()))
	);
	assert_eq!(vector.as_slice(), &[1, 2, 3]);
	assert_eq!(vector.capacity(), 4);

	vector.push(4);
	assert_eq!(vector.try_reserve(4), Ok(()));
	assert_eq!(vector.as_slice(), &[1, 2, 3, 4]);
}

#[test]
fn failed_dense_vector_growth_keeps_handles() {
	let budget = Budget::new(1);
	let mut dense = DenseVector::new_in(&budget);
	dense.try_reserve(4).unwrap();
	let handles: Vec<_> = ["a", "b", "c", "d"].into_iter().map(|value| dense.push(value.to_owned())).collect();
	dense.remove(handles[1]);

	assert_eq!(
		dense.try_reserve(8),
		Err(AllocError::OutOfMemory(Layout::array::<String>(8).unwrap()))
	);
	assert_eq!(dense.capacity(), 4);
	assert_eq!(dense.len(), 3);
	assert_eq!(dense[handles[0]], "a");
	assert_eq!(dense.get(handles[1]), None);
	assert_eq!(dense[handles[3]], "d");
	assert_eq!(dense.next_index(), handles[1]);
}

#[test]
fn capacity_overflow_is_reported() {
	let mut vector: Vector<u64> = Vector::new();
	assert_eq!(vector.try_reserve(usize::MAX), Err(AllocError::CapacityOverflow));
	assert!(vector.is_empty());
}

#[test]
fn zero_sized_allocations_are_aligned() {
	for align in [1, 8, 64, 4096] {
		let layout = Layout::from_size_align(0, align).unwrap();
		let ptr = Global.allocate(layout).unwrap();
		assert_eq!(ptr.as_ptr() as usize % align, 0);
		unsafe { Global.deallocate(ptr, layout) }
	}
}
