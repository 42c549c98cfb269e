//! Hashing and equality capabilities of the hash containers.

use core::{
	borrow::Borrow,
	hash::{BuildHasher, Hash},
};

/// The hash builder used by [`Set`](`crate::Set`) and [`Map`](`crate::Map`) unless specified otherwise.
pub type DefaultHashBuilder = ahash::RandomState;

/// Hashes keys of type `Q`.
///
/// Implemented for every [`BuildHasher`] over [`Hash`] keys.
/// Hashes of keys that compare equal (through the paired [`KeyEqual`]) must be equal.
pub trait KeyHasher<Q: ?Sized> {
	/// Hashes `key`.
	fn hash(&self, key: &Q) -> u64;
}

impl<Q: ?Sized + Hash, S: BuildHasher> KeyHasher<Q> for S {
	fn hash(&self, key: &Q) -> u64 {
		self.hash_one(key)
	}
}

/// Compares stored values of type `A` with lookup keys of type `B`.
pub trait KeyEqual<A: ?Sized, B: ?Sized = A> {
	/// Whether `stored` and `key` are the same key.
	fn equal(&self, stored: &A, key: &B) -> bool;
}

/// Compares through [`Borrow`] and [`Eq`], like the standard library's maps do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultEqual;

impl<A, B> KeyEqual<A, B> for DefaultEqual
where
	A: ?Sized + Borrow<B>,
	B: ?Sized + Eq,
{
	fn equal(&self, stored: &A, key: &B) -> bool {
		stored.borrow() == key
	}
}
