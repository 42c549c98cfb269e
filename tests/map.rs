use core::hash::{Hash, Hasher};
use keel::{Index, Map, SetConfig};
use std::panic::{catch_unwind, AssertUnwindSafe};

#[test]
fn round_trip() {
	let mut map = Map::new();
	for i in 0..500_u32 {
		let (index, inserted) = map.insert(i, i.to_string());
		assert!(inserted);
		assert_eq!(map.at_index(index), &i.to_string());
	}

	for i in 0..500_u32 {
		assert_eq!(map.find(&i), Some(&i.to_string()));
		assert_eq!(map[&i], i.to_string());
	}
	assert_eq!(map.len(), 500);
	assert!(map.bucket_count() > SetConfig::DEFAULT.bucket_count);
}

#[test]
fn existing_keys_keep_their_values() {
	let mut map = Map::new();
	let (index, inserted) = map.insert("key", 1);
	assert!(inserted);

	assert_eq!(map.insert("key", 2), (index, false));
	assert_eq!(map.emplace_with("key", || unreachable!()), (index, false));
	assert_eq!(map.at("key"), &1);
	assert_eq!(map.len(), 1);
}

#[test]
fn remove_is_idempotent() {
	let mut map: Map<_, _> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
	assert_eq!(map.remove("b"), Some(2));
	assert_eq!(map.remove("b"), None);
	assert_eq!(map.remove_entry("c"), Some(("c", 3)));
	assert!(!map.contains_key("c"));
	assert!(map.contains_key("a"));
	assert_eq!(map.len(), 1);
}

#[test]
fn handles_stay_in_lockstep() {
	let mut map: Map<i32, i32> = Map::new();
	let handles: Vec<_> = (0..10).map(|i| map.insert(i, i * 100).0).collect();

	map.remove(&3);
	map.remove(&7);
	let (reused, _) = map.insert(70, 7000);
	assert_eq!(reused, handles[7]);
	let (reused, _) = map.insert(30, 3000);
	assert_eq!(reused, handles[3]);

	for (key, value) in map.iter() {
		assert_eq!(*key * 100, *value);
	}
	assert_eq!(map.key_at(reused), Some(&30));
	assert_eq!(map.get_index(reused), Some((&30, &3000)));
	assert_eq!(map.find_index(&70), Some(handles[7]));
	assert_eq!(map.get_index(Index::new(10)), None);
}

#[test]
fn iteration_pairs_keys_with_values() {
	let mut map: Map<char, usize> = "abcdef".chars().zip(0..).collect();
	map.remove(&'b');
	map.remove(&'e');

	for value in map.values_mut() {
		*value *= 2;
	}
	for (_, value) in map.iter_mut() {
		*value += 1;
	}

	let entries: Vec<_> = map.iter().map(|(key, value)| (*key, *value)).collect();
	assert_eq!(entries, [('a', 1), ('c', 5), ('d', 7), ('f', 11)]);
	assert!(map.keys().copied().eq(['a', 'c', 'd', 'f']));
	assert!(map.values().rev().copied().eq([11, 7, 5, 1]));

	let indexed: Vec<_> = map.iter_indexed().map(|(index, key, _)| (index.get(), *key)).collect();
	assert_eq!(indexed, [(0, 'a'), (2, 'c'), (3, 'd'), (5, 'f')]);
	assert_eq!(format!("{map:?}"), "{'a': 1, 'c': 5, 'd': 7, 'f': 11}");
}

#[test]
fn get_or_insert_default_counts() {
	let mut counts = Map::new();
	for word in "the cat and the hat and the bat".split(' ') {
		*counts.get_or_insert_default(word) += 1;
	}
	assert_eq!(counts["the"], 3);
	assert_eq!(counts["and"], 2);
	assert_eq!(counts["cat"], 1);
	assert_eq!(counts.len(), 5);

	*counts.find_mut("cat").unwrap() = 9;
	*counts.at_index_mut(counts.find_index("hat").unwrap()) = 8;
	assert_eq!(counts["cat"], 9);
	assert_eq!(counts["hat"], 8);
}

#[test]
#[should_panic = "key not found"]
fn at_missing_key_panics() {
	let map = Map::<u8, u8>::new();
	map.at(&0_u8);
}

#[test]
fn clone_and_clear() {
	let mut map: Map<String, Vec<u8>> = Map::new();
	map.insert("x".to_owned(), vec![1]);
	map.insert("y".to_owned(), vec![2, 3]);

	let clone = map.clone();
	map.clear();
	assert!(map.is_empty());
	assert_eq!(map.find("x"), None);
	assert_eq!(clone.find("y"), Some(&vec![2, 3]));
	assert_eq!(map.insert("z".to_owned(), vec![]).0.get(), 0);
}

/// Hashes and compares by `id` only. Dropping one with `bomb` set panics.
#[derive(Debug)]
struct Key {
	id: u32,
	bomb: bool,
}

impl Drop for Key {
	fn drop(&mut self) {
		if self.bomb {
			panic!("key {} exploded", self.id)
		}
	}
}

impl PartialEq for Key {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}
impl Eq for Key {}

impl Hash for Key {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

#[test]
fn clear_with_panicking_key_destructor_keeps_handles_in_lockstep() {
	let mut map = Map::new();
	map.insert(Key { id: 1, bomb: true }, "one");
	map.insert(Key { id: 2, bomb: false }, "two");

	assert!(catch_unwind(AssertUnwindSafe(|| map.clear())).is_err());
	assert!(map.is_empty());
	assert_eq!(map.values().count(), 0);

	let (index, inserted) = map.insert(Key { id: 3, bomb: false }, "three");
	assert!(inserted);
	assert_eq!(index, Index::new(0));
	assert_eq!(map.find(&Key { id: 3, bomb: false }), Some(&"three"));
	assert_eq!(map.get_index(index).map(|(key, value)| (key.id, *value)), Some((3, "three")));
	assert_eq!(map.len(), 1);
}
