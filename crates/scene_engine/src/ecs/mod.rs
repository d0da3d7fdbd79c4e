//! Entity-component storage
//!
//! Game objects and their components live in a [`World`]. Each component kind
//! has its own generational table; game objects hold typed handles into them.

pub mod component;
pub mod components;
pub mod game_object;
pub mod storage;
pub mod world;

pub use component::{Component, ComponentKind, ComponentSlots, ComponentTables};
pub use game_object::{GameObject, GameObjectId};
pub use storage::{ComponentHandle, ComponentStorage};
pub use world::World;
