//! Type-tagged handles.

use core::{
	cmp::Ordering,
	fmt::{self, Debug, Formatter},
	hash::{Hash, Hasher},
	marker::PhantomData,
};

/// A handle to a logical slot holding a `T`.
///
/// The tag only prevents mixing up handles of different containers at compile time.
/// All trait implementations are independent of `T`.
///
/// "No handle" is spelled [`None`] wherever it can occur.
pub struct Index<T> {
	value: usize,
	marker: PhantomData<fn() -> T>,
}

impl<T> Index<T> {
	/// Wraps a raw slot number.
	#[must_use]
	pub const fn new(value: usize) -> Self {
		Self {
			value,
			marker: PhantomData,
		}
	}

	/// The raw slot number.
	#[must_use]
	pub const fn get(self) -> usize {
		self.value
	}

	/// Retags this handle for a container that shares the same slot domain.
	#[must_use]
	pub const fn cast<U>(self) -> Index<U> {
		Index::new(self.value)
	}
}

impl<T> From<usize> for Index<T> {
	fn from(value: usize) -> Self {
		Self::new(value)
	}
}

impl<T> From<Index<T>> for usize {
	fn from(index: Index<T>) -> Self {
		index.value
	}
}

impl<T> Clone for Index<T> {
	fn clone(&self) -> Self {
		*self
	}
}
impl<T> Copy for Index<T> {}

impl<T> PartialEq for Index<T> {
	fn eq(&self, other: &Self) -> bool {
		self.value == other.value
	}
}
impl<T> Eq for Index<T> {}

impl<T> PartialEq<usize> for Index<T> {
	fn eq(&self, other: &usize) -> bool {
		self.value == *other
	}
}

impl<T> PartialOrd for Index<T> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}
impl<T> Ord for Index<T> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.value.cmp(&other.value)
	}
}

impl<T> Hash for Index<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.value.hash(state);
	}
}

impl<T> Debug for Index<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "Index({})", self.value)
	}
}

impl<T> fmt::Display for Index<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.value, f)
	}
}
