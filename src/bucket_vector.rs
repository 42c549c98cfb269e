//! Intrusive bucket chains over the slots of another container.

use crate::vector::Vector;
use core::iter::FusedIterator;
use tap::Tap;

/// A position while walking one bucket's chain.
///
/// Obtained from [`BucketVector::start`] and moved along with [`BucketVector::advance`].
/// Once the walk is over, [`BucketCursor::found`] is [`None`] and the cursor sits at the chain's tail,
/// ready for [`BucketVector::append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketCursor {
	slot: Option<usize>,
	prev: Option<usize>,
	bucket: usize,
	started: bool,
}

impl BucketCursor {
	/// The slot the cursor is at, if it's inside the chain.
	#[must_use]
	pub fn found(&self) -> Option<usize> {
		self.slot
	}

	/// The bucket being walked.
	#[must_use]
	pub fn bucket(&self) -> usize {
		self.bucket
	}

	/// Whether the walk ran past the chain's last slot.
	#[must_use]
	pub fn at_end(&self) -> bool {
		self.started && self.slot.is_none()
	}
}

/// Bucket heads plus one "next" link per slot.
///
/// Each linked slot is part of exactly one bucket's chain.
/// The slots themselves (and what they hold) live elsewhere, usually in a [`DenseVector`](`crate::DenseVector`).
#[derive(Debug, Clone, Default)]
pub struct BucketVector {
	roots: Vector<Option<usize>>,
	next: Vector<Option<usize>>,
}

impl BucketVector {
	/// Creates a new instance with `bucket_count` empty buckets and no slots.
	#[must_use]
	pub fn with_buckets(bucket_count: usize) -> Self {
		let mut buckets = Self::default();
		buckets.roots.resize(bucket_count, None);
		buckets
	}

	/// Creates a new instance with `bucket_count` empty buckets and `slot_count` unlinked slots.
	#[must_use]
	pub fn with_buckets_and_slots(bucket_count: usize, slot_count: usize) -> Self {
		Self::with_buckets(bucket_count).tap_mut(|buckets| buckets.next.resize(slot_count, None))
	}

	/// The number of buckets.
	pub fn bucket_count(&self) -> usize {
		self.roots.len()
	}

	/// The number of slots, linked or not.
	pub fn len(&self) -> usize {
		self.next.len()
	}

	/// Whether there are no slots.
	pub fn is_empty(&self) -> bool {
		self.next.is_empty()
	}

	/// Adds an unlinked slot and returns it.
	pub fn push_slot(&mut self) -> usize {
		self.next.push(None);
		self.next.len() - 1
	}

	/// A cursor before the first slot of `bucket`'s chain.
	///
	/// # Panics
	///
	/// Iff `bucket` is out of range.
	pub fn start(&self, bucket: usize) -> BucketCursor {
		assert!(bucket < self.bucket_count(), "bucket {bucket} out of range");
		BucketCursor {
			slot: None,
			prev: None,
			bucket,
			started: false,
		}
	}

	/// Moves `cursor` to the next slot of its chain and returns that slot, or [`None`] at the end.
	pub fn advance(&self, cursor: &mut BucketCursor) -> Option<usize> {
		if cursor.started {
			if let Some(slot) = cursor.slot {
				cursor.prev = Some(slot);
				cursor.slot = self.next[slot];
			}
		} else {
			cursor.started = true;
			cursor.slot = self.roots[cursor.bucket];
		}
		cursor.slot
	}

	/// Walks `cursor` to the tail of its chain.
	pub fn seek_end(&self, cursor: &mut BucketCursor) {
		while self.advance(cursor).is_some() {}
	}

	/// Links `slot` after the tail that `cursor` sits at.
	///
	/// # Panics
	///
	/// Iff `cursor` isn't [at the end](`BucketCursor::at_end`) of its chain, or `slot` was never pushed.
	pub fn append(&mut self, cursor: &BucketCursor, slot: usize) {
		assert!(cursor.at_end(), "can only append at the end of a chain");
		self.next[slot] = None;
		self.set_prev(cursor, Some(slot));
	}

	/// Links `slot` at the tail of `bucket`'s chain.
	pub fn append_to_bucket(&mut self, bucket: usize, slot: usize) {
		let mut cursor = self.start(bucket);
		self.seek_end(&mut cursor);
		self.append(&cursor, slot);
	}

	/// Splices the slot `cursor` is at out of its chain.
	///
	/// # Panics
	///
	/// Iff `cursor` isn't at a slot.
	pub fn unlink(&mut self, cursor: &BucketCursor) {
		let Some(slot) = cursor.slot else {
			panic!("can only unlink a found slot")
		};
		let next = self.next[slot].take();
		self.set_prev(cursor, next);
	}

	fn set_prev(&mut self, cursor: &BucketCursor, target: Option<usize>) {
		match cursor.prev {
			Some(prev) => self.next[prev] = target,
			None => self.roots[cursor.bucket] = target,
		}
	}

	/// The slots of `bucket`'s chain, in chain order.
	pub fn chain(&self, bucket: usize) -> Chain<'_> {
		Chain {
			buckets: self,
			cursor: self.start(bucket),
		}
	}

	/// Drops all slots and empties all buckets, keeping the bucket count.
	pub fn clear(&mut self) {
		self.next.clear();
		self.roots.iter_mut().for_each(|root| *root = None);
	}
}

/// Iterator over one bucket's chain.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
	buckets: &'a BucketVector,
	cursor: BucketCursor,
}

impl Iterator for Chain<'_> {
	type Item = usize;

	fn next(&mut self) -> Option<Self::Item> {
		self.buckets.advance(&mut self.cursor)
	}
}

impl FusedIterator for Chain<'_> {}
