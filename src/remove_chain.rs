//! Slot bookkeeping for containers that recycle freed slots.

use crate::vector::Vector;
use core::{iter::FusedIterator, ptr};
use scopeguard::ScopeGuard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Link {
	Occupied,
	/// A hole, linking to the next free slot (if any).
	Free(Option<usize>),
}

/// What a slot of a [`RemoveChain`] currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotState {
	/// Holds a live element.
	Occupied,
	/// Was handed out before and is waiting to be reused.
	Free,
	/// Was never handed out.
	Unallocated,
}

/// Tracks which slots of a pool are occupied, threading the free ones into a singly-linked list.
///
/// Freed slots are reused most-recently-freed first.
/// Slots are only ever appended, never given up, so slot numbers stay valid as handles for as long as the chain lives
/// (or until [`RemoveChain::clear`]).
#[derive(Debug, Clone, Default)]
pub struct RemoveChain {
	links: Vector<Link>,
	root: Option<usize>,
	free: usize,
}

impl RemoveChain {
	/// Creates a new, empty instance.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Claims a slot, reusing the most recently freed one if there is any, and returns it.
	///
	/// A returned slot equal to the old [`RemoveChain::full_len`] is new.
	pub fn push(&mut self) -> usize {
		match self.root {
			Some(slot) => {
				let Link::Free(next) = self.links[slot] else {
					unreachable!("free list reached occupied slot {slot}")
				};
				self.root = next;
				self.links[slot] = Link::Occupied;
				self.free -= 1;
				slot
			}
			None => {
				self.links.push(Link::Occupied);
				self.links.len() - 1
			}
		}
	}

	/// Frees `slot`, putting it first in line for reuse.
	///
	/// Returns `false` (changing nothing) iff `slot` wasn't occupied.
	pub fn remove(&mut self, slot: usize) -> bool {
		if !self.is_occupied(slot) {
			return false;
		}
		self.links[slot] = Link::Free(self.root);
		self.root = Some(slot);
		self.free += 1;
		true
	}

	/// The number of occupied slots.
	pub fn len(&self) -> usize {
		self.links.len() - self.free
	}

	/// Whether no slot is occupied.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// The number of slots ever handed out, occupied or free.
	pub fn full_len(&self) -> usize {
		self.links.len()
	}

	/// Whether there are no holes.
	pub fn is_full(&self) -> bool {
		self.free == 0
	}

	/// Whether `slot` currently holds a live element.
	pub fn is_occupied(&self, slot: usize) -> bool {
		matches!(self.links.get(slot), Some(Link::Occupied))
	}

	/// Classifies `slot`. Slots at or past [`RemoveChain::full_len`] are [`SlotState::Unallocated`].
	pub fn state(&self, slot: usize) -> SlotState {
		match self.links.get(slot) {
			Some(Link::Occupied) => SlotState::Occupied,
			Some(Link::Free(_)) => SlotState::Free,
			None => SlotState::Unallocated,
		}
	}

	/// The slot the next [`RemoveChain::push`] will return.
	pub fn next_index(&self) -> usize {
		self.root.unwrap_or(self.links.len())
	}

	/// Makes room for at least `full_len` slots in total without reallocating.
	pub fn reserve(&mut self, full_len: usize) {
		self.links.reserve(full_len)
	}

	/// Forgets all slots.
	pub fn clear(&mut self) {
		self.links.clear();
		self.root = None;
		self.free = 0;
	}

	/// The free slots, in reuse order.
	pub fn free_slots(&self) -> FreeSlots<'_> {
		FreeSlots {
			links: &self.links,
			next: self.root,
		}
	}

	/// The occupied slots, ascending.
	pub fn occupied(&self) -> OccupiedSlots<'_> {
		OccupiedSlots::new(&self.links, self.len())
	}

	pub(crate) fn links(&self) -> &[Link] {
		&self.links
	}
}

/// Iterator over the free slots of a [`RemoveChain`], most recently freed first.
#[derive(Debug, Clone)]
pub struct FreeSlots<'a> {
	links: &'a [Link],
	next: Option<usize>,
}

impl Iterator for FreeSlots<'_> {
	type Item = usize;

	fn next(&mut self) -> Option<Self::Item> {
		let slot = self.next?;
		self.next = match self.links[slot] {
			Link::Free(next) => next,
			Link::Occupied => None,
		};
		Some(slot)
	}
}

impl FusedIterator for FreeSlots<'_> {}

/// Iterator over the occupied slots of a [`RemoveChain`], skipping holes from either end.
#[derive(Debug, Clone)]
pub struct OccupiedSlots<'a> {
	links: &'a [Link],
	front: usize,
	back: usize,
	remaining: usize,
}

impl<'a> OccupiedSlots<'a> {
	pub(crate) fn new(links: &'a [Link], occupied: usize) -> Self {
		Self {
			links,
			front: 0,
			back: links.len(),
			remaining: occupied,
		}
	}
}

impl Iterator for OccupiedSlots<'_> {
	type Item = usize;

	fn next(&mut self) -> Option<Self::Item> {
		while self.front < self.back {
			let slot = self.front;
			self.front += 1;
			if self.links[slot] == Link::Occupied {
				self.remaining -= 1;
				return Some(slot);
			}
		}
		None
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl DoubleEndedIterator for OccupiedSlots<'_> {
	fn next_back(&mut self) -> Option<Self::Item> {
		while self.front < self.back {
			self.back -= 1;
			if self.links[self.back] == Link::Occupied {
				self.remaining -= 1;
				return Some(self.back);
			}
		}
		None
	}
}

impl ExactSizeIterator for OccupiedSlots<'_> {}
impl FusedIterator for OccupiedSlots<'_> {}

fn count_occupied(links: &[Link]) -> usize {
	links.iter().filter(|link| **link == Link::Occupied).count()
}

/// Drops every value at an occupied slot of `links`, continuing past panicking destructors.
///
/// With the `"std"` feature, the first panic is resumed once all values are dropped.
///
/// # Safety
///
/// `base` must point to storage for at least `links.len()` values of `T`,
/// with the slots marked occupied holding live values. These are dead afterwards.
pub(crate) unsafe fn drop_occupied<T>(base: *mut T, links: &[Link]) {
	#[cfg(feature = "std")]
	let mut panic = None;

	let mut remaining = scopeguard::guard(OccupiedSlots::new(links, count_occupied(links)), |remaining| {
		// Only reached while unwinding.
		for slot in remaining {
			ptr::drop_in_place(base.add(slot));
		}
	});

	while let Some(slot) = remaining.next() {
		#[cfg(feature = "std")]
		{
			use std::panic::{catch_unwind, AssertUnwindSafe};

			let slot_panic = catch_unwind(AssertUnwindSafe(|| ptr::drop_in_place(base.add(slot)))).err();
			panic = panic.or(slot_panic);
		}
		#[cfg(not(feature = "std"))]
		ptr::drop_in_place(base.add(slot));
	}
	ScopeGuard::into_inner(remaining);

	#[cfg(feature = "std")]
	if let Some(panic) = panic {
		std::panic::resume_unwind(panic)
	}
}
