//! A bucket-chained hash set with stable handles.

use crate::{
	bucket_vector::{BucketCursor, BucketVector},
	dense_vector::{DenseVector, IterIndexed},
	hash::{DefaultEqual, DefaultHashBuilder, KeyEqual, KeyHasher},
	index::Index,
};
use core::{
	fmt::{self, Debug, Formatter},
	iter::FusedIterator,
};
use tap::Tap;

/// Sizing of a [`Set`]'s (or [`Map`](`crate::Map`)'s) buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SetConfig {
	/// The initial number of buckets.
	pub bucket_count: usize,
	/// The average chain length that may not be exceeded.
	pub max_depth: usize,
	/// The factor the bucket count grows by when rehashing automatically.
	pub resize_scale: usize,
}

impl SetConfig {
	/// 101 buckets, an average depth of at most 4 and fourfold growth.
	pub const DEFAULT: Self = Self {
		bucket_count: 101,
		max_depth: 4,
		resize_scale: 4,
	};

	#[track_caller]
	fn validate(&self) {
		assert!(self.bucket_count >= 1, "`bucket_count` must be at least 1");
		assert!(self.max_depth >= 1, "`max_depth` must be at least 1");
		assert!(self.resize_scale >= 2, "`resize_scale` must be at least 2");
	}

	fn capacity(&self, bucket_count: usize) -> usize {
		bucket_count.saturating_mul(self.max_depth)
	}
}

impl Default for SetConfig {
	fn default() -> Self {
		Self::DEFAULT
	}
}

/// A hash set storing its values in a [`DenseVector`], chained into buckets by slot.
///
/// Every value keeps the same [`Index<T>`] handle until it's removed.
/// New values are linked at the tail of their bucket's chain.
///
/// The number of values never exceeds `bucket_count() * config().max_depth`:
/// an insertion that would break this first rehashes into more buckets.
pub struct Set<T, S = DefaultHashBuilder, E = DefaultEqual> {
	buckets: BucketVector,
	elements: DenseVector<T>,
	config: SetConfig,
	hasher: S,
	equal: E,
}

#[allow(clippy::cast_possible_truncation)] // The remainder is less than `bucket_count`.
fn bucket_of<Q: ?Sized, S: KeyHasher<Q>>(hasher: &S, key: &Q, bucket_count: usize) -> usize {
	(hasher.hash(key) % bucket_count as u64) as usize
}

impl<T> Set<T> {
	/// Creates a new, empty instance with the [default configuration](`SetConfig::DEFAULT`).
	#[must_use]
	pub fn new() -> Self {
		Self::with_config(SetConfig::DEFAULT)
	}

	/// Creates a new, empty instance.
	///
	/// # Panics
	///
	/// Iff `config` is invalid, i.e. has no buckets, a `max_depth` of 0 or a `resize_scale` below 2.
	#[must_use]
	pub fn with_config(config: SetConfig) -> Self {
		Self::with_config_hasher_and_equal(config, DefaultHashBuilder::new(), DefaultEqual)
	}
}

impl<T, S, E> Set<T, S, E> {
	/// Creates a new, empty instance using the given hash and equality capabilities.
	///
	/// # Panics
	///
	/// Iff `config` is invalid, i.e. has no buckets, a `max_depth` of 0 or a `resize_scale` below 2.
	#[track_caller]
	pub fn with_config_hasher_and_equal(config: SetConfig, hasher: S, equal: E) -> Self {
		config.validate();
		Self {
			buckets: BucketVector::with_buckets(config.bucket_count),
			elements: DenseVector::new(),
			config,
			hasher,
			equal,
		}
	}

	/// Creates a new, empty instance with the [default configuration](`SetConfig::DEFAULT`) using `hasher`.
	pub fn with_hasher(hasher: S) -> Self
	where
		E: Default,
	{
		Self::with_config_hasher_and_equal(SetConfig::DEFAULT, hasher, E::default())
	}

	/// The number of values.
	pub fn len(&self) -> usize {
		self.elements.len()
	}

	/// Whether there are no values.
	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// The current number of buckets.
	pub fn bucket_count(&self) -> usize {
		self.buckets.bucket_count()
	}

	/// The bucket chains, by element slot.
	pub fn buckets(&self) -> &BucketVector {
		&self.buckets
	}

	/// The sizing this instance was created with.
	pub fn config(&self) -> &SetConfig {
		&self.config
	}

	/// The hash capability.
	pub fn hasher(&self) -> &S {
		&self.hasher
	}

	/// The value with handle `index`, iff it's live.
	pub fn get(&self, index: Index<T>) -> Option<&T> {
		self.elements.get(index)
	}

	/// Whether `index` refers to a live value.
	pub fn contains_index(&self, index: Index<T>) -> bool {
		self.elements.contains(index)
	}

	/// Iterates over the values in slot order.
	pub fn iter(&self) -> impl '_ + DoubleEndedIterator<Item = &T> + ExactSizeIterator + FusedIterator {
		self.elements.iter()
	}

	/// Iterates over the values in slot order, along with their handles.
	pub fn iter_indexed(&self) -> IterIndexed<'_, T> {
		self.elements.iter_indexed()
	}

	/// Drops all values. The bucket count is kept.
	pub fn clear(&mut self) {
		// Unlinked first: a panicking destructor mustn't leave chains into dropped slots.
		self.buckets.clear();
		self.elements.clear();
	}

	pub(crate) fn elements(&self) -> &DenseVector<T> {
		&self.elements
	}

	/// Walks `key`'s bucket, stopping at the matching value or at the end of the chain.
	pub(crate) fn locate<Q: ?Sized>(&self, key: &Q) -> BucketCursor
	where
		S: KeyHasher<Q>,
		E: KeyEqual<T, Q>,
	{
		let bucket = bucket_of(&self.hasher, key, self.bucket_count());
		let mut cursor = self.buckets.start(bucket);
		while let Some(slot) = self.buckets.advance(&mut cursor) {
			// Linked slots are live.
			let stored = unsafe { self.elements.get_unchecked(Index::new(slot)) };
			if self.equal.equal(stored, key) {
				break;
			}
		}
		cursor
	}

	/// The handle of the value equal to `key`, if any.
	pub fn find_index<Q: ?Sized>(&self, key: &Q) -> Option<Index<T>>
	where
		S: KeyHasher<Q>,
		E: KeyEqual<T, Q>,
	{
		self.locate(key).found().map(Index::new)
	}

	/// The value equal to `key`, if any.
	pub fn find<Q: ?Sized>(&self, key: &Q) -> Option<&T>
	where
		S: KeyHasher<Q>,
		E: KeyEqual<T, Q>,
	{
		let index = self.find_index(key)?;
		Some(unsafe { self.elements.get_unchecked(index) })
	}

	/// Whether there's a value equal to `key`.
	pub fn contains<Q: ?Sized>(&self, key: &Q) -> bool
	where
		S: KeyHasher<Q>,
		E: KeyEqual<T, Q>,
	{
		self.locate(key).found().is_some()
	}

	/// Removes and returns the value equal to `key`, if any.
	pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<T>
	where
		S: KeyHasher<Q>,
		E: KeyEqual<T, Q>,
	{
		self.remove_full(key).map(|(_, value)| value)
	}

	/// Removes the value equal to `key`, if any, returning it along with the handle it had.
	pub fn remove_full<Q: ?Sized>(&mut self, key: &Q) -> Option<(Index<T>, T)>
	where
		S: KeyHasher<Q>,
		E: KeyEqual<T, Q>,
	{
		let cursor = self.locate(key);
		let index = Index::new(cursor.found()?);
		self.buckets.unlink(&cursor);
		let value = self.elements.remove(index)?;
		Some((index, value))
	}
}

impl<T, S: KeyHasher<T>, E: KeyEqual<T>> Set<T, S, E> {
	/// Inserts `value` unless an equal value is present.
	///
	/// Returns the handle of the new or existing value, and whether `value` was inserted.
	/// If it wasn't, `value` is dropped.
	///
	/// # Panics
	///
	/// Iff the storage can't be grown.
	pub fn insert(&mut self, value: T) -> (Index<T>, bool) {
		let cursor = self.locate(&value);
		match cursor.found() {
			Some(slot) => (Index::new(slot), false),
			None => (self.insert_located(cursor, value), true),
		}
	}

	/// Inserts `value` at the end of the chain `cursor` walked, which must not contain an equal value.
	pub(crate) fn insert_located(&mut self, mut cursor: BucketCursor, value: T) -> Index<T> {
		debug_assert!(cursor.at_end());
		debug_assert!(self.buckets.len() >= self.elements.full_len());

		if self.maybe_rehash() {
			cursor = self.buckets.start(bucket_of(&self.hasher, &value, self.bucket_count()));
			self.buckets.seek_end(&mut cursor);
		}
		if self.elements.next_index().get() == self.buckets.len() {
			self.buckets.push_slot();
		}
		let index = self.elements.push(value);
		self.buckets.append(&cursor, index.get());
		index
	}

	/// Rebuilds all chains over `bucket_count` buckets.
	///
	/// Chains are rebuilt in slot order.
	///
	/// # Panics
	///
	/// Iff `bucket_count` is 0.
	pub fn rehash(&mut self, bucket_count: usize) {
		assert!(bucket_count >= 1, "`bucket_count` must be at least 1");
		// Swapped in only once complete, in case the hasher panics.
		let mut buckets = BucketVector::with_buckets_and_slots(bucket_count, self.buckets.len());
		for (index, value) in self.elements.iter_indexed() {
			let bucket = bucket_of(&self.hasher, value, bucket_count);
			buckets.append_to_bucket(bucket, index.get());
		}
		self.buckets = buckets;
	}

	/// Rehashes into [`SetConfig::resize_scale`] times as many buckets (repeatedly, if necessary)
	/// iff one more value would exceed the depth bound.
	///
	/// Returns whether a rehash happened.
	pub fn maybe_rehash(&mut self) -> bool {
		let needed = self.len() + 1;
		if needed <= self.config.capacity(self.bucket_count()) {
			return false;
		}

		let mut bucket_count = self.bucket_count();
		while self.config.capacity(bucket_count) < needed {
			bucket_count = bucket_count.saturating_mul(self.config.resize_scale);
		}
		self.rehash(bucket_count);
		true
	}
}

impl<T: Clone, S: Clone, E: Clone> Clone for Set<T, S, E> {
	fn clone(&self) -> Self {
		Self {
			buckets: self.buckets.clone(),
			elements: self.elements.clone(),
			config: self.config,
			hasher: self.hasher.clone(),
			equal: self.equal.clone(),
		}
	}
}

impl<T: Debug, S, E> Debug for Set<T, S, E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}

impl<T, S: Default, E: Default> Default for Set<T, S, E> {
	fn default() -> Self {
		Self::with_config_hasher_and_equal(SetConfig::DEFAULT, S::default(), E::default())
	}
}

impl<T, S: KeyHasher<T>, E: KeyEqual<T>> Extend<T> for Set<T, S, E> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for value in iter {
			self.insert(value);
		}
	}
}

impl<T, S: KeyHasher<T> + Default, E: KeyEqual<T> + Default> FromIterator<T> for Set<T, S, E> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self::default().tap_mut(|set| set.extend(iter))
	}
}
