//! A bucket-chained hash map with stable handles.

use crate::{
	dense_vector::DenseVector,
	hash::{DefaultEqual, DefaultHashBuilder, KeyEqual, KeyHasher},
	index::Index,
	set::{Set, SetConfig},
};
use core::{
	fmt::{self, Debug, Formatter},
	iter::FusedIterator,
	ops,
};
use tap::Tap;

/// A hash map made of a [`Set`] of keys and a [`DenseVector`] of values that share one handle domain.
///
/// A key and its value always sit at the same slot of their respective containers:
/// both are only ever pushed and removed together, so their free lists stay identical.
/// Handles are [`Index<V>`] and stay valid until their entry is removed.
pub struct Map<K, V, S = DefaultHashBuilder, E = DefaultEqual> {
	keys: Set<K, S, E>,
	values: DenseVector<V>,
}

impl<K, V> Map<K, V> {
	/// Creates a new, empty instance with the [default configuration](`SetConfig::DEFAULT`).
	#[must_use]
	pub fn new() -> Self {
		Self::with_config(SetConfig::DEFAULT)
	}

	/// Creates a new, empty instance.
	///
	/// # Panics
	///
	/// Iff `config` is invalid.
	#[must_use]
	pub fn with_config(config: SetConfig) -> Self {
		Self::with_config_hasher_and_equal(config, DefaultHashBuilder::new(), DefaultEqual)
	}
}

impl<K, V, S, E> Map<K, V, S, E> {
	/// Creates a new, empty instance using the given hash and equality capabilities.
	///
	/// # Panics
	///
	/// Iff `config` is invalid.
	#[track_caller]
	pub fn with_config_hasher_and_equal(config: SetConfig, hasher: S, equal: E) -> Self {
		Self {
			keys: Set::with_config_hasher_and_equal(config, hasher, equal),
			values: DenseVector::new(),
		}
	}

	/// The number of entries.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Whether there are no entries.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// The current number of buckets.
	pub fn bucket_count(&self) -> usize {
		self.keys.bucket_count()
	}

	/// The keys, as a [`Set`] with the same handles.
	pub fn key_set(&self) -> &Set<K, S, E> {
		&self.keys
	}

	/// The handle of the entry with `key`, if any.
	pub fn find_index<Q: ?Sized>(&self, key: &Q) -> Option<Index<V>>
	where
		S: KeyHasher<Q>,
		E: KeyEqual<K, Q>,
	{
		self.keys.find_index(key).map(Index::cast)
	}

	/// The value for `key`, if any.
	pub fn find<Q: ?Sized>(&self, key: &Q) -> Option<&V>
	where
		S: KeyHasher<Q>,
		E: KeyEqual<K, Q>,
	{
		let index = self.find_index(key)?;
		Some(unsafe { self.values.get_unchecked(index) })
	}

	/// The value for `key`, if any.
	pub fn find_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
	where
		S: KeyHasher<Q>,
		E: KeyEqual<K, Q>,
	{
		let index = self.find_index(key)?;
		Some(unsafe { self.values.get_unchecked_mut(index) })
	}

	/// The value for `key`.
	///
	/// # Panics
	///
	/// Iff there is no entry with `key`.
	#[track_caller]
	pub fn at<Q: ?Sized>(&self, key: &Q) -> &V
	where
		S: KeyHasher<Q>,
		E: KeyEqual<K, Q>,
	{
		match self.find(key) {
			Some(value) => value,
			None => panic!("key not found"),
		}
	}

	/// Whether there's an entry with `key`.
	pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
	where
		S: KeyHasher<Q>,
		E: KeyEqual<K, Q>,
	{
		self.keys.contains(key)
	}

	/// The value with handle `index`.
	///
	/// # Panics
	///
	/// Iff `index` doesn't refer to a live entry.
	#[track_caller]
	pub fn at_index(&self, index: Index<V>) -> &V {
		&self.values[index]
	}

	/// The value with handle `index`.
	///
	/// # Panics
	///
	/// Iff `index` doesn't refer to a live entry.
	#[track_caller]
	pub fn at_index_mut(&mut self, index: Index<V>) -> &mut V {
		&mut self.values[index]
	}

	/// The entry with handle `index`, iff it's live.
	pub fn get_index(&self, index: Index<V>) -> Option<(&K, &V)> {
		let value = self.values.get(index)?;
		Some((unsafe { self.keys.elements().get_unchecked(index.cast()) }, value))
	}

	/// The key with handle `index`, iff it's live.
	pub fn key_at(&self, index: Index<V>) -> Option<&K> {
		self.keys.get(index.cast())
	}

	/// Removes the entry with `key`, returning its value, if any.
	pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
	where
		S: KeyHasher<Q>,
		E: KeyEqual<K, Q>,
	{
		self.remove_entry(key).map(|(_, value)| value)
	}

	/// Removes the entry with `key`, returning it, if any.
	pub fn remove_entry<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)>
	where
		S: KeyHasher<Q>,
		E: KeyEqual<K, Q>,
	{
		let (index, key) = self.keys.remove_full(key)?;
		let value = self.values.remove(index.cast())?;
		Some((key, value))
	}

	/// Drops all entries. The bucket count is kept.
	pub fn clear(&mut self) {
		// Both sides must end up empty even if a key's destructor panics.
		let _values = scopeguard::guard(&mut self.values, |values| values.clear());
		self.keys.clear();
	}

	/// Iterates over the entries in slot order.
	pub fn iter(&self) -> impl '_ + DoubleEndedIterator<Item = (&K, &V)> + ExactSizeIterator + FusedIterator {
		self.keys.iter().zip(self.values.iter())
	}

	/// Iterates over the entries in slot order, with mutable values.
	pub fn iter_mut(&mut self) -> impl '_ + DoubleEndedIterator<Item = (&K, &mut V)> + ExactSizeIterator + FusedIterator {
		self.keys.iter().zip(self.values.iter_mut())
	}

	/// Iterates over the entries in slot order, along with their handles.
	pub fn iter_indexed(&self) -> impl '_ + DoubleEndedIterator<Item = (Index<V>, &K, &V)> + ExactSizeIterator + FusedIterator {
		self.keys
			.iter()
			.zip(self.values.iter_indexed())
			.map(|(key, (index, value))| (index, key, value))
	}

	/// Iterates over the keys in slot order.
	pub fn keys(&self) -> impl '_ + DoubleEndedIterator<Item = &K> + ExactSizeIterator + FusedIterator {
		self.keys.iter()
	}

	/// Iterates over the values in slot order.
	pub fn values(&self) -> impl '_ + DoubleEndedIterator<Item = &V> + ExactSizeIterator + FusedIterator {
		self.values.iter()
	}

	/// Iterates mutably over the values in slot order.
	pub fn values_mut(&mut self) -> impl '_ + DoubleEndedIterator<Item = &mut V> + ExactSizeIterator + FusedIterator {
		self.values.iter_mut()
	}
}

impl<K, V, S: KeyHasher<K>, E: KeyEqual<K>> Map<K, V, S, E> {
	/// Inserts an entry for `key` with the value returned by `value` unless `key` is already present.
	///
	/// Returns the handle of the new or existing entry, and whether it's new.
	/// If the key was present, `value` isn't called and `key` is dropped.
	///
	/// # Panics
	///
	/// Iff the storage can't be grown.
	pub fn emplace_with<F: FnOnce() -> V>(&mut self, key: K, value: F) -> (Index<V>, bool) {
		let cursor = self.keys.locate(&key);
		if let Some(slot) = cursor.found() {
			return (Index::new(slot), false);
		}

		let value = value();
		// Once the key is in, the value must follow without failing.
		self.values.prepare_push();
		let index = self.keys.insert_located(cursor, key).cast();
		debug_assert_eq!(self.values.next_index(), index);
		(self.values.push(value), true)
	}

	/// Inserts `value` for `key` unless `key` is already present, in which case `key` and `value` are dropped.
	///
	/// Returns the handle of the new or existing entry, and whether it's new.
	///
	/// # Panics
	///
	/// Iff the storage can't be grown.
	pub fn insert(&mut self, key: K, value: V) -> (Index<V>, bool) {
		self.emplace_with(key, || value)
	}

	/// The value for `key`, inserting [`V::default()`](`Default::default`) first if there's none.
	///
	/// # Panics
	///
	/// Iff the storage can't be grown.
	pub fn get_or_insert_default(&mut self, key: K) -> &mut V
	where
		V: Default,
	{
		let (index, _) = self.emplace_with(key, V::default);
		unsafe { self.values.get_unchecked_mut(index) }
	}
}

impl<K, V, S, E, Q> ops::Index<&Q> for Map<K, V, S, E>
where
	Q: ?Sized,
	S: KeyHasher<Q>,
	E: KeyEqual<K, Q>,
{
	type Output = V;

	#[track_caller]
	fn index(&self, key: &Q) -> &Self::Output {
		self.at(key)
	}
}

impl<K: Clone, V: Clone, S: Clone, E: Clone> Clone for Map<K, V, S, E> {
	fn clone(&self) -> Self {
		Self {
			keys: self.keys.clone(),
			values: self.values.clone(),
		}
	}
}

impl<K: Debug, V: Debug, S, E> Debug for Map<K, V, S, E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

impl<K, V, S: Default, E: Default> Default for Map<K, V, S, E> {
	fn default() -> Self {
		Self::with_config_hasher_and_equal(SetConfig::DEFAULT, S::default(), E::default())
	}
}

impl<K, V, S: KeyHasher<K>, E: KeyEqual<K>> Extend<(K, V)> for Map<K, V, S, E> {
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
		for (key, value) in iter {
			self.insert(key, value);
		}
	}
}

impl<K, V, S: KeyHasher<K> + Default, E: KeyEqual<K> + Default> FromIterator<(K, V)> for Map<K, V, S, E> {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self::default().tap_mut(|map| map.extend(iter))
	}
}
