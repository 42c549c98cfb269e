//! Handle allocation with a packed list of live handles.

use crate::{index::Index, vector::Vector};

/// Hands out `usize` handles and keeps the live ones packed at the front of a dense list.
///
/// `sparse[handle]` is the handle's position in the dense list (if it's live),
/// and `dense[position]` is the handle at that position.
/// Removal swaps the last live handle into the gap, so positions are not stable, but handles are.
///
/// Removed handles are kept past the end of the live part of the dense list and are reused first.
#[derive(Debug, Clone, Default)]
pub struct SparseSet {
	sparse: Vector<Option<usize>>,
	dense: Vector<usize>,
	len: usize,
}

impl SparseSet {
	/// Creates a new, empty instance.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Claims a handle and appends it to the live part of the dense list.
	///
	/// The returned handle is at position `len() - 1` afterwards.
	pub fn push(&mut self) -> usize {
		let position = self.len;
		if position == self.dense.len() {
			self.sparse.push(Some(position));
			self.dense.push(position);
			self.len += 1;
			return position;
		}

		let handle = self.dense[position];
		self.sparse[handle] = Some(position);
		self.len += 1;
		handle
	}

	/// Releases `handle`, moving the last live handle into its position.
	///
	/// Returns `false` (changing nothing) iff `handle` isn't live.
	pub fn remove(&mut self, handle: usize) -> bool {
		let Some(position) = self.find(handle) else {
			return false;
		};

		self.len -= 1;
		self.dense.swap(position, self.len);
		let moved = self.dense[position];
		self.sparse[moved] = Some(position);
		self.sparse[handle] = None;
		true
	}

	/// The position of `handle` in the dense list, iff it's live.
	pub fn find(&self, handle: usize) -> Option<usize> {
		self.sparse.get(handle).copied().flatten()
	}

	/// The handle at `position` in the dense list.
	///
	/// # Panics
	///
	/// Iff `position >= len()`.
	pub fn index_of(&self, position: usize) -> usize {
		self.dense()[position]
	}

	/// Whether `handle` is live.
	pub fn contains(&self, handle: usize) -> bool {
		self.find(handle).is_some()
	}

	/// The number of live handles.
	pub fn len(&self) -> usize {
		self.len
	}

	/// Whether there are no live handles.
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// The number of handles ever handed out.
	pub fn full_len(&self) -> usize {
		self.sparse.len()
	}

	/// Whether every handle ever handed out is live.
	pub fn is_full(&self) -> bool {
		self.len == self.full_len()
	}

	/// The handle the next [`SparseSet::push`] will return.
	pub fn next_index(&self) -> usize {
		if self.is_full() {
			self.len
		} else {
			self.dense[self.len]
		}
	}

	/// Makes room for at least `count` handles in total.
	pub fn reserve(&mut self, count: usize) {
		self.sparse.reserve(count);
		self.dense.reserve(count);
	}

	/// Forgets all handles.
	pub fn clear(&mut self) {
		self.sparse.clear();
		self.dense.clear();
		self.len = 0;
	}

	/// The live handles, in dense order.
	pub fn dense(&self) -> &[usize] {
		&self.dense[..self.len]
	}

	/// The live handles, in dense order, tagged for a container of `T`.
	pub fn indices<'a, T: 'a>(&'a self) -> impl 'a + DoubleEndedIterator<Item = Index<T>> + ExactSizeIterator {
		self.dense().iter().copied().map(Index::new)
	}
}
