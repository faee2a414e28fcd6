//! # Entity — Lightweight Identifiers
//!
//! An [`Entity`] is just an identifier — it carries no data of its own. The
//! [`ComponentStore`](super::store::ComponentStore) maps entities to their
//! components; an entity "exists" exactly as long as the store says it does.
//!
//! Ids are generational: each slot index pairs with a generation counter that
//! is bumped when the slot is recycled. A handle kept across a despawn goes
//! stale (its generation no longer matches) and every lookup through it fails
//! safely instead of resolving to whatever entity reused the slot.

use std::fmt;

/// A handle to an entity in a [`ComponentStore`](super::store::ComponentStore).
///
/// Only valid for the store that created it, and only while its generation
/// matches (i.e. until it is despawned).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    /// Slot index. Recycled after despawn.
    pub(crate) index: u32,
    /// Bumped on each slot reuse so stale handles are detectable.
    pub(crate) generation: u32,
}

impl Entity {
    /// The raw slot index. Meant for diagnostics, not identity comparisons.
    pub fn index(self) -> u32 {
        self.index
    }

    /// The generation of this handle.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Allocates and recycles entity ids.
///
/// Spawning pops a free slot if one exists (generation already bumped),
/// otherwise grows. Despawning bumps the slot's generation and pushes it onto
/// the free list.
pub(crate) struct EntityAllocator {
    /// Current generation per slot ever allocated.
    generations: Vec<u32>,
    /// Slots available for reuse.
    free_list: Vec<u32>,
    /// Next fresh index when the free list is empty.
    len: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn allocate(&mut self) -> Entity {
        if let Some(index) = self.free_list.pop() {
            let generation = self.generations[index as usize];
            Entity { index, generation }
        } else {
            let index = self.len;
            self.len += 1;
            self.generations.push(0);
            Entity {
                index,
                generation: 0,
            }
        }
    }

    /// Returns `false` if the handle was already stale.
    pub fn deallocate(&mut self, entity: Entity) -> bool {
        let idx = entity.index as usize;
        if idx < self.generations.len() && self.generations[idx] == entity.generation {
            self.generations[idx] += 1;
            self.free_list.push(entity.index);
            true
        } else {
            false
        }
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        let idx = entity.index as usize;
        idx < self.generations.len() && self.generations[idx] == entity.generation
    }

    pub fn alive_count(&self) -> usize {
        (self.len as usize) - self.free_list.len()
    }
}
