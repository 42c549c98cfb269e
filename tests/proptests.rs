use keel::{DenseVector, Index, Map, Set, SetConfig, SparseVector, Vector};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone)]
enum SlotOperation {
	Push { value: i32 },
	Remove { slot: usize },
	Get { slot: usize },
}

fn slot_operation() -> impl Strategy<Value = SlotOperation> {
	prop_oneof![
		2 => (0..100i32).prop_map(|value| SlotOperation::Push { value }),
		1 => (0..40usize).prop_map(|slot| SlotOperation::Remove { slot }),
		1 => (0..40usize).prop_map(|slot| SlotOperation::Get { slot }),
	]
}

#[derive(Debug, Clone)]
enum VectorOperation {
	Push { value: i32 },
	Insert { at: usize, value: i32 },
	Remove { at: usize, count: usize },
	RemoveOrdered { at: usize, count: usize },
	SwapRemove { at: usize },
	Pop,
}

fn vector_operation() -> impl Strategy<Value = VectorOperation> {
	prop_oneof![
		3 => any::<i32>().prop_map(|value| VectorOperation::Push { value }),
		1 => (any::<usize>(), any::<i32>()).prop_map(|(at, value)| VectorOperation::Insert { at, value }),
		1 => (any::<usize>(), 0..5usize).prop_map(|(at, count)| VectorOperation::Remove { at, count }),
		1 => (any::<usize>(), 0..5usize).prop_map(|(at, count)| VectorOperation::RemoveOrdered { at, count }),
		1 => any::<usize>().prop_map(|at| VectorOperation::SwapRemove { at }),
		1 => Just(VectorOperation::Pop),
	]
}

#[derive(Debug, Clone)]
enum KeyOperation {
	Insert { key: u8, value: i32 },
	Remove { key: u8 },
	Get { key: u8 },
}

fn key_operation() -> impl Strategy<Value = KeyOperation> {
	prop_oneof![
		2 => (any::<u8>(), any::<i32>()).prop_map(|(key, value)| KeyOperation::Insert { key, value }),
		1 => any::<u8>().prop_map(|key| KeyOperation::Remove { key }),
		1 => any::<u8>().prop_map(|key| KeyOperation::Get { key }),
	]
}

proptest! {
	#[test]
	fn dense_vector_matches_model(operations in proptest::collection::vec(slot_operation(), 0..200)) {
		let mut dense = DenseVector::new();
		let mut model = BTreeMap::new();

		for operation in operations {
			match operation {
				SlotOperation::Push { value } => {
					let expected = dense.next_index();
					let index = dense.push(value);
					prop_assert_eq!(index, expected);
					prop_assert!(model.insert(index.get(), value).is_none(), "handle {:?} handed out twice", index);
				}
				SlotOperation::Remove { slot } => {
					prop_assert_eq!(dense.remove(Index::new(slot)), model.remove(&slot));
				}
				SlotOperation::Get { slot } => {
					prop_assert_eq!(dense.get(Index::new(slot)), model.get(&slot));
				}
			}

			prop_assert_eq!(dense.len(), model.len());
			prop_assert!(dense.full_len() <= dense.capacity());
			let live: Vec<_> = dense.iter_indexed().map(|(index, value)| (index.get(), *value)).collect();
			let expected: Vec<_> = model.iter().map(|(slot, value)| (*slot, *value)).collect();
			prop_assert_eq!(live, expected);
		}
	}

	#[test]
	fn sparse_vector_matches_model(operations in proptest::collection::vec(slot_operation(), 0..200)) {
		let mut sparse = SparseVector::new();
		let mut model = BTreeMap::new();

		for operation in operations {
			match operation {
				SlotOperation::Push { value } => {
					let index = sparse.push(value);
					prop_assert!(model.insert(index.get(), value).is_none(), "handle {:?} handed out twice", index);
				}
				SlotOperation::Remove { slot } => {
					prop_assert_eq!(sparse.remove(Index::new(slot)), model.remove(&slot));
				}
				SlotOperation::Get { slot } => {
					prop_assert_eq!(sparse.get(Index::new(slot)), model.get(&slot));
				}
			}

			// Packed: exactly the live values, no holes.
			prop_assert_eq!(sparse.as_slice().len(), model.len());
			for (index, value) in sparse.iter_indexed() {
				prop_assert_eq!(model.get(&index.get()), Some(value));
			}
		}
	}

	#[test]
	fn vector_matches_std(operations in proptest::collection::vec(vector_operation(), 0..200)) {
		let mut vector = Vector::new();
		let mut reference = Vec::new();

		for operation in operations {
			let len = reference.len();
			match operation {
				VectorOperation::Push { value } => {
					vector.push(value);
					reference.push(value);
				}
				VectorOperation::Insert { at, value } => {
					let at = at % (len + 1);
					vector.insert(at, value);
					reference.insert(at, value);
				}
				VectorOperation::Remove { at, count } => {
					if len == 0 {
						continue;
					}
					let at = at % len;
					let count = count.min(len - at);
					let moved = count.min(len - at - count);
					let tail = reference[len - moved..].to_vec();
					reference.truncate(len - moved);
					reference.splice(at..at + count, tail);
					vector.remove(at, count);
				}
				VectorOperation::RemoveOrdered { at, count } => {
					if len == 0 {
						continue;
					}
					let at = at % len;
					let count = count.min(len - at);
					reference.drain(at..at + count);
					vector.remove_ordered(at, count);
				}
				VectorOperation::SwapRemove { at } => {
					if len == 0 {
						continue;
					}
					let at = at % len;
					prop_assert_eq!(vector.swap_remove(at), reference.swap_remove(at));
				}
				VectorOperation::Pop => {
					prop_assert_eq!(vector.pop(), reference.pop());
				}
			}

			prop_assert_eq!(vector.as_slice(), reference.as_slice());
			prop_assert!(vector.len() <= vector.capacity());
		}
	}

	#[test]
	fn map_matches_std(operations in proptest::collection::vec(key_operation(), 0..300)) {
		let mut map = Map::with_config(SetConfig {
			bucket_count: 3,
			max_depth: 2,
			resize_scale: 2,
		});
		let mut model = HashMap::new();

		for operation in operations {
			match operation {
				KeyOperation::Insert { key, value } => {
					let (index, inserted) = map.insert(key, value);
					prop_assert_eq!(inserted, !model.contains_key(&key));
					model.entry(key).or_insert(value);
					prop_assert_eq!(map.key_at(index), Some(&key));
				}
				KeyOperation::Remove { key } => {
					prop_assert_eq!(map.remove(&key), model.remove(&key));
				}
				KeyOperation::Get { key } => {
					prop_assert_eq!(map.find(&key), model.get(&key));
				}
			}

			prop_assert_eq!(map.len(), model.len());
			prop_assert!(map.len() <= map.bucket_count() * 2);
		}

		for (key, value) in map.iter() {
			prop_assert_eq!(model.get(key), Some(value));
		}
	}

	#[test]
	fn set_depth_bound_holds(values in proptest::collection::vec(any::<u16>(), 0..500), config in (1..20usize, 1..6usize, 2..5usize)) {
		let (bucket_count, max_depth, resize_scale) = config;
		let mut set = Set::with_config(SetConfig { bucket_count, max_depth, resize_scale });

		for value in values {
			if value % 5 == 0 {
				set.remove(&(value / 2));
			}
			set.insert(value);
			prop_assert!(set.len() <= set.bucket_count() * max_depth);
			prop_assert!(set.contains(&value));
		}
	}
}
