//! A handle-stable array that keeps its values packed.

use crate::{index::Index, sparse_set::SparseSet, vector::Vector};
use core::{
	fmt::{self, Debug, Formatter},
	ops, slice,
};
use tap::Tap;

/// An array of `T` addressed through stable [`Index<T>`] handles, with the values stored contiguously.
///
/// Removal moves the last value into the gap, so [`SparseVector::as_slice`] never has holes,
/// at the cost of an extra indirection on lookup.
pub struct SparseVector<T> {
	values: Vector<T>,
	set: SparseSet,
}

impl<T> SparseVector<T> {
	/// Creates a new, empty instance.
	#[must_use]
	pub fn new() -> Self {
		Self {
			values: Vector::new(),
			set: SparseSet::new(),
		}
	}

	/// Stores `value` and returns its handle.
	///
	/// # Panics
	///
	/// Iff the storage can't be grown.
	pub fn push(&mut self, value: T) -> Index<T> {
		self.values.push(value);
		Index::new(self.set.push())
	}

	/// Removes and returns the value at `index`, iff it's live.
	pub fn remove(&mut self, index: Index<T>) -> Option<T> {
		let position = self.set.find(index.get())?;
		let value = self.values.swap_remove(position);
		self.set.remove(index.get());
		Some(value)
	}

	/// The value at `index`, iff it's live.
	pub fn get(&self, index: Index<T>) -> Option<&T> {
		let position = self.set.find(index.get())?;
		Some(&self.values[position])
	}

	/// The value at `index`, iff it's live.
	pub fn get_mut(&mut self, index: Index<T>) -> Option<&mut T> {
		let position = self.set.find(index.get())?;
		Some(&mut self.values[position])
	}

	/// Whether `index` refers to a live value.
	pub fn contains(&self, index: Index<T>) -> bool {
		self.set.contains(index.get())
	}

	/// The number of live values.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Whether there are no live values.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// The number of handles ever handed out.
	pub fn full_len(&self) -> usize {
		self.set.full_len()
	}

	/// The handle the next [`SparseVector::push`] will return.
	pub fn next_index(&self) -> Index<T> {
		Index::new(self.set.next_index())
	}

	/// The handle bookkeeping.
	pub fn sparse_set(&self) -> &SparseSet {
		&self.set
	}

	/// The live values, packed, in the same order as [`SparseSet::dense`].
	pub fn as_slice(&self) -> &[T] {
		&self.values
	}

	/// The live values, packed, in the same order as [`SparseSet::dense`].
	pub fn as_mut_slice(&mut self) -> &mut [T] {
		&mut self.values
	}

	/// Iterates over the live values in packed order.
	pub fn iter(&self) -> slice::Iter<'_, T> {
		self.values.iter()
	}

	/// Iterates mutably over the live values in packed order.
	pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
		self.values.iter_mut()
	}

	/// Iterates over the live values in packed order, along with their handles.
	pub fn iter_indexed(&self) -> impl '_ + DoubleEndedIterator<Item = (Index<T>, &T)> + ExactSizeIterator {
		self.set.indices().zip(self.values.iter())
	}

	/// Iterates mutably over the live values in packed order, along with their handles.
	pub fn iter_indexed_mut(&mut self) -> impl '_ + DoubleEndedIterator<Item = (Index<T>, &mut T)> + ExactSizeIterator {
		self.set.indices().zip(self.values.iter_mut())
	}

	/// Makes room for at least `capacity` values in total.
	///
	/// # Panics
	///
	/// Iff the storage can't be obtained.
	pub fn reserve(&mut self, capacity: usize) {
		self.values.reserve(capacity);
		self.set.reserve(capacity);
	}

	/// Drops all values and forgets all handles.
	pub fn clear(&mut self) {
		self.set.clear();
		self.values.clear();
	}
}

impl<T> Default for SparseVector<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Clone> Clone for SparseVector<T> {
	fn clone(&self) -> Self {
		Self {
			values: self.values.clone(),
			set: self.set.clone(),
		}
	}
}

impl<T: Debug> Debug for SparseVector<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_map()
			.entries(self.iter_indexed().map(|(index, value)| (index.get(), value)))
			.finish()
	}
}

impl<T> ops::Index<Index<T>> for SparseVector<T> {
	type Output = T;

	#[track_caller]
	fn index(&self, index: Index<T>) -> &Self::Output {
		match self.get(index) {
			Some(value) => value,
			None => panic!("no value at {index:?}"),
		}
	}
}

impl<T> ops::IndexMut<Index<T>> for SparseVector<T> {
	#[track_caller]
	fn index_mut(&mut self, index: Index<T>) -> &mut Self::Output {
		match self.get_mut(index) {
			Some(value) => value,
			None => panic!("no value at {index:?}"),
		}
	}
}

impl<T> Extend<T> for SparseVector<T> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for value in iter {
			self.push(value);
		}
	}
}

impl<T> FromIterator<T> for SparseVector<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self::new().tap_mut(|sparse| sparse.extend(iter))
	}
}
