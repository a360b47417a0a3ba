//! Fixed-capacity entity pool
//!
//! Entities are allocated once when the session starts and recycled by
//! toggling their free flag. The pool never grows, so the real-time loop
//! does no allocation for obstacles or explosions.

/// An entity that can live in a [`Pool`]
pub trait Poolable {
    fn is_free(&self) -> bool;
    /// Return the entity to the pool
    fn release(&mut self);
}

/// Eagerly allocated pool of `N` reusable entities
#[derive(Debug, Clone)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T: Poolable> Pool<T> {
    /// Build `capacity` entities with `make(index)`
    pub fn new(capacity: usize, mut make: impl FnMut(usize) -> T) -> Self {
        Self {
            items: (0..capacity).map(&mut make).collect(),
        }
    }

    /// Empty pool, used outside of a running session
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// First free entity (and its slot), or `None` when exhausted
    pub fn first_free(&mut self) -> Option<(usize, &mut T)> {
        self.items.iter_mut().enumerate().find(|(_, item)| item.is_free())
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Entities currently in play, in slot order
    pub fn active(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|item| !item.is_free())
    }

    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut().filter(|item| !item.is_free())
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Free every entity without deallocating
    pub fn release_all(&mut self) {
        for item in &mut self.items {
            item.release();
        }
    }
}
