use keel::{chunk::Chunk, AllocError, CompactVector, InlineVector, Vector};
use std::{cell::Cell, rc::Rc};

#[derive(Debug, Clone)]
struct Counted(Rc<Cell<usize>>);

impl Drop for Counted {
	fn drop(&mut self) {
		self.0.set(self.0.get() + 1)
	}
}

#[test]
fn push_grows_by_doubling() {
	let mut vector = Vector::new();
	assert_eq!(vector.capacity(), 0);

	let mut capacities = vec![];
	for i in 0..9 {
		vector.push(i);
		capacities.push(vector.capacity());
	}
	assert_eq!(capacities, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
	assert_eq!(vector.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn order_survives_reallocation() {
	let mut vector = Vector::with_capacity(2);
	vector.extend(0..100);
	assert!(vector.iter().copied().eq(0..100));
	assert!(vector.capacity() >= 100);
}

#[test]
fn insert_shifts_right() {
	let mut vector: Vector<_> = [1, 2, 4].into_iter().collect();
	assert_eq!(*vector.insert(2, 3), 3);
	vector.insert(0, 0);
	vector.insert(5, 5);
	assert_eq!(vector.as_slice(), &[0, 1, 2, 3, 4, 5]);
}

#[test]
#[should_panic = "insertion index"]
fn insert_past_end() {
	let mut vector: Vector<_> = [1].into_iter().collect();
	vector.insert(2, 3);
}

#[test]
fn unordered_remove_moves_only_needed_tail() {
	let mut vector: Vector<_> = (0..10).collect();
	vector.remove(2, 3);
	assert_eq!(vector.as_slice(), &[0, 1, 7, 8, 9, 5, 6]);

	let mut vector: Vector<_> = (0..6).collect();
	vector.remove(1, 4);
	assert_eq!(vector.as_slice(), &[0, 5]);

	let mut vector: Vector<_> = (0..6).collect();
	vector.remove(3, 3);
	assert_eq!(vector.as_slice(), &[0, 1, 2]);
}

#[test]
fn ordered_remove_keeps_order() {
	let mut vector: Vector<_> = (0..10).collect();
	vector.remove_ordered(2, 3);
	assert_eq!(vector.as_slice(), &[0, 1, 5, 6, 7, 8, 9]);
	vector.remove_ordered(0, 0);
	assert_eq!(vector.len(), 7);
}

#[test]
#[should_panic = "out of bounds"]
fn remove_out_of_range() {
	let mut vector: Vector<_> = (0..3).collect();
	vector.remove(2, 2);
}

#[test]
fn swap_remove_and_pop() {
	let mut vector: Vector<_> = (0..4).collect();
	assert_eq!(vector.swap_remove(0), 0);
	assert_eq!(vector.as_slice(), &[3, 1, 2]);
	assert_eq!(vector.swap_remove(2), 2);
	assert_eq!(vector.pop(), Some(1));
	assert_eq!(vector.pop(), Some(3));
	assert_eq!(vector.pop(), None);
}

#[test]
fn resize_and_truncate() {
	let mut vector = Vector::new();
	vector.resize(3, 'a');
	assert_eq!(vector.as_slice(), &['a'; 3]);
	vector.resize(1, 'b');
	assert_eq!(vector.as_slice(), &['a']);
	vector.resize(2, 'c');
	assert_eq!(vector.as_slice(), &['a', 'c']);
	vector.truncate(5);
	assert_eq!(vector.len(), 2);
	vector.clear();
	assert!(vector.is_empty());
	assert!(vector.capacity() >= 3);
}

#[test]
fn drops_exactly_once() {
	let drops = Rc::new(Cell::new(0));
	let mut vector = Vector::new();
	for _ in 0..10 {
		vector.push(Counted(drops.clone()));
	}

	vector.remove(0, 2);
	assert_eq!(drops.get(), 2);
	vector.remove_ordered(3, 3);
	assert_eq!(drops.get(), 5);
	drop(vector.swap_remove(0));
	assert_eq!(drops.get(), 6);
	vector.truncate(2);
	assert_eq!(drops.get(), 8);

	let clone = vector.clone();
	drop(vector);
	assert_eq!(drops.get(), 10);
	drop(clone);
	assert_eq!(drops.get(), 12);
}

#[test]
fn inline_vector_is_bounded() {
	let mut vector = InlineVector::<u8, 3>::new();
	assert_eq!(vector.capacity(), 3);
	vector.extend([1, 2, 3]);
	assert_eq!(vector.try_reserve(4), Err(AllocError::CapacityOverflow));
	assert_eq!(vector.as_slice(), &[1, 2, 3]);
}

#[test]
#[should_panic = "capacity overflow"]
fn inline_vector_overflow_panics() {
	let mut vector = InlineVector::<u8, 2>::new();
	vector.extend([1, 2, 3]);
}

#[test]
fn compact_vector_spills_once() {
	let mut vector = CompactVector::<String, 2>::new();
	vector.push("a".to_owned());
	vector.push("b".to_owned());
	let chunk_ptr = vector.as_ptr();
	assert_eq!(vector.capacity(), 2);

	vector.push("c".to_owned());
	assert_ne!(vector.as_ptr(), chunk_ptr);
	assert_eq!(vector.capacity(), 4);

	vector.truncate(1);
	vector.push("d".to_owned());
	assert_eq!(vector.capacity(), 4);
	assert_eq!(vector.as_slice(), &["a", "d"]);
}

#[test]
fn compares_across_chunks() {
	let heap: Vector<_> = (0..3).collect();
	let mut inline = InlineVector::<_, 4>::new();
	inline.extend(0..3);
	assert_eq!(heap, inline);
	assert_eq!(format!("{heap:?}"), "[0, 1, 2]");
}

#[test]
fn zero_sized_elements() {
	let mut vector = Vector::new();
	for _ in 0..100 {
		vector.push(());
	}
	assert_eq!(vector.len(), 100);
	vector.remove(10, 50);
	assert_eq!(vector.len(), 50);
}

#[test]
fn chunk_trait_is_usable_directly() {
	let mut chunk = keel::chunk::HeapChunk::<u32>::new();
	chunk.allocate(4).unwrap();
	assert_eq!(chunk.capacity(), 4);
	unsafe {
		chunk.construct(3, 7);
		assert_eq!(*chunk.slot(3), 7);
		assert_eq!(chunk.take(3), 7);
	}
	chunk.deallocate();
	assert_eq!(chunk.capacity(), 0);
}
