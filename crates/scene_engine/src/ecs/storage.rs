//! Generational component storage
//!
//! Each component kind lives in its own growable arena. Creating a component
//! returns a [`ComponentHandle`] carrying the slot index and generation; freeing
//! a slot bumps its generation so outstanding handles stop resolving instead of
//! silently aliasing whatever is stored there next.

use crate::foundation::collections::{DefaultKey, SlotMap, TypedHandle};

/// Generation-based handle to a component of kind `T`
pub type ComponentHandle<T> = TypedHandle<T>;

/// Growable arena holding every component of one kind
#[derive(Debug, Clone)]
pub struct ComponentStorage<T> {
    components: SlotMap<DefaultKey, T>,
}

impl<T> ComponentStorage<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            components: SlotMap::new(),
        }
    }

    /// Create a table with `capacity` slots reserved up front
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            components: SlotMap::with_capacity(capacity),
        }
    }

    /// Store a component and return its handle
    pub fn create(&mut self, component: T) -> ComponentHandle<T> {
        ComponentHandle::new(self.components.insert(component))
    }

    /// Resolve a handle, `None` if the slot was freed since it was issued
    pub fn get(&self, handle: ComponentHandle<T>) -> Option<&T> {
        self.components.get(handle.key())
    }

    /// Resolve a handle mutably
    pub fn get_mut(&mut self, handle: ComponentHandle<T>) -> Option<&mut T> {
        self.components.get_mut(handle.key())
    }

    /// Free a slot, returning the component that lived there
    pub fn remove(&mut self, handle: ComponentHandle<T>) -> Option<T> {
        self.components.remove(handle.key())
    }

    /// Whether the handle still resolves
    pub fn contains(&self, handle: ComponentHandle<T>) -> bool {
        self.components.contains_key(handle.key())
    }

    /// Number of live components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the table holds no live components
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Slots available before the table has to grow
    pub fn capacity(&self) -> usize {
        self.components.capacity()
    }

    /// Iterate over live components and their handles
    pub fn iter(&self) -> impl Iterator<Item = (ComponentHandle<T>, &T)> {
        self.components.iter().map(|(key, component)| (ComponentHandle::new(key), component))
    }
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}
