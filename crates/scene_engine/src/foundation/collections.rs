//! Specialized collection types

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

pub use slotmap::{SlotMap, DefaultKey, Key, KeyData};

/// Typed generational handle for type-safe references into a slot map
///
/// Wraps a slot-map key (`{index, generation}`) and tags it with the type it
/// points at, so a `TypedHandle<Camera>` can never be used to index the
/// transform table. A handle whose slot was freed and recycled fails to resolve
/// because the stored generation no longer matches.
pub struct TypedHandle<T> {
    key: DefaultKey,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> TypedHandle<T> {
    /// Create a new typed handle from a key
    pub fn new(key: DefaultKey) -> Self {
        Self {
            key,
            _phantom: PhantomData,
        }
    }

    /// Get the underlying key
    pub fn key(&self) -> DefaultKey {
        self.key
    }

    /// Slot index inside the owning table
    pub fn index(&self) -> u32 {
        (self.key.data().as_ffi() & 0xFFFF_FFFF) as u32
    }

    /// Generation of the slot at the time the handle was issued
    pub fn generation(&self) -> u32 {
        (self.key.data().as_ffi() >> 32) as u32
    }
}

impl<T> Clone for TypedHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedHandle<T> {}

impl<T> PartialEq for TypedHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for TypedHandle<T> {}

impl<T> Hash for TypedHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<T> fmt::Debug for TypedHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedHandle")
            .field("index", &self.index())
            .field("generation", &self.generation())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recycled_slot_bumps_generation() {
        let mut map: SlotMap<DefaultKey, u32> = SlotMap::new();
        let first = TypedHandle::<u32>::new(map.insert(1));
        map.remove(first.key());
        let second = TypedHandle::<u32>::new(map.insert(2));

        assert_eq!(first.index(), second.index());
        assert_ne!(first.generation(), second.generation());
        assert_ne!(first, second);
        assert!(map.get(first.key()).is_none());
    }
}
