//! # ComponentStore — The Central Container
//!
//! The [`ComponentStore`] owns all entities, their components, and the
//! scene-global resources (singletons like `Time` or the texture registry).
//!
//! Entities are kept in a single insertion-ordered list and components live in
//! one [`Column`] per type, so a [`view`](ComponentStore::view) walks entities
//! in the order they were created — deterministic across repeated passes of
//! the same frame. The store is built for simulations of a few dozen
//! entities; there is no archetype table, no paging, and no parallel
//! iteration.
//!
//! Attaching a component type an entity already has is a configuration error
//! and is rejected — overwriting must go through the explicit
//! [`replace`](ComponentStore::replace).

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::error::StoreError;

use super::column::Column;
use super::entity::{Entity, EntityAllocator};
use super::view::ViewSet;

/// Owns all entities, components, and resources of one scene.
pub struct ComponentStore {
    allocator: EntityAllocator,
    /// Alive entities in creation order. Views iterate this list.
    entities: Vec<Entity>,
    /// One column per component type.
    columns: HashMap<TypeId, Column>,
    /// Singleton values not tied to any entity, keyed by type.
    resources: HashMap<TypeId, Box<dyn Any>>,
    /// Name → entity lookup, and the reverse for despawn cleanup.
    names: HashMap<String, Entity>,
    names_reverse: HashMap<u32, String>,
}

impl ComponentStore {
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            entities: Vec::new(),
            columns: HashMap::new(),
            resources: HashMap::new(),
            names: HashMap::new(),
            names_reverse: HashMap::new(),
        }
    }

    // ── Entities ─────────────────────────────────────────────────────

    /// Create an entity with no components.
    pub fn spawn_empty(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        self.entities.push(entity);
        entity
    }

    /// Destroy an entity and every component attached to it.
    ///
    /// Returns `false` if the handle was already stale.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.allocator.is_alive(entity) {
            return false;
        }
        if let Some(name) = self.names_reverse.remove(&entity.index()) {
            self.names.remove(&name);
        }
        for column in self.columns.values_mut() {
            column.remove(entity.index());
        }
        self.columns.retain(|_, column| !column.is_empty());
        self.entities.retain(|&e| e != entity);
        self.allocator.deallocate(entity);
        true
    }

    /// Destroy every entity. Resources are left in place.
    pub fn despawn_all(&mut self) {
        for entity in std::mem::take(&mut self.entities) {
            self.allocator.deallocate(entity);
        }
        self.columns.clear();
        self.names.clear();
        self.names_reverse.clear();
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    pub fn entity_count(&self) -> usize {
        self.allocator.alive_count()
    }

    // ── Named entities ───────────────────────────────────────────────

    /// Assign a unique name to an entity.
    pub fn name_entity(&mut self, entity: Entity, name: &str) -> Result<(), StoreError> {
        if !self.allocator.is_alive(entity) {
            return Err(StoreError::DeadEntity { entity });
        }
        if let Some(&existing) = self.names.get(name) {
            return Err(StoreError::DuplicateName {
                name: name.to_string(),
                existing,
            });
        }
        self.names.insert(name.to_string(), entity);
        self.names_reverse.insert(entity.index(), name.to_string());
        Ok(())
    }

    /// Look up the entity with the given name.
    pub fn named(&self, name: &str) -> Option<Entity> {
        self.names.get(name).copied()
    }

    // ── Components ───────────────────────────────────────────────────

    /// Attach a component to an entity.
    ///
    /// Fails if the entity is dead or already has a component of this type —
    /// duplication is never silent; use [`replace`](Self::replace) to
    /// overwrite on purpose.
    pub fn insert<T: 'static>(&mut self, entity: Entity, component: T) -> Result<(), StoreError> {
        if !self.allocator.is_alive(entity) {
            return Err(StoreError::DeadEntity { entity });
        }
        let column = self.columns.entry(TypeId::of::<T>()).or_default();
        if column.contains(entity.index()) {
            return Err(StoreError::DuplicateComponent {
                entity,
                component: std::any::type_name::<T>(),
            });
        }
        column.insert(entity.index(), Box::new(component));
        Ok(())
    }

    /// Attach a component, explicitly overwriting any existing one of the
    /// same type. Returns the previous value if there was one.
    pub fn replace<T: 'static>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<Option<T>, StoreError> {
        if !self.allocator.is_alive(entity) {
            return Err(StoreError::DeadEntity { entity });
        }
        let column = self.columns.entry(TypeId::of::<T>()).or_default();
        let old = column
            .insert(entity.index(), Box::new(component))
            .and_then(|cell| cell.downcast::<T>().ok())
            .map(|boxed| *boxed);
        Ok(old)
    }

    /// Detach and return a component. `None` if the entity is dead or never
    /// had one.
    pub fn remove<T: 'static>(&mut self, entity: Entity) -> Option<T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.columns
            .get_mut(&TypeId::of::<T>())?
            .remove(entity.index())
            .and_then(|cell| cell.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }

    /// Shared access to a component on a specific entity.
    pub fn get<T: 'static>(&self, entity: Entity) -> Option<&T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.columns.get(&TypeId::of::<T>())?.get::<T>(entity.index())
    }

    /// Exclusive access to a component on a specific entity.
    pub fn get_mut<T: 'static>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.columns
            .get_mut(&TypeId::of::<T>())?
            .get_mut::<T>(entity.index())
    }

    // ── Views ────────────────────────────────────────────────────────

    /// Run `f` for every entity that has all components in `Q`, in entity
    /// insertion order. Component references are live — mutations are visible
    /// to everything that runs afterwards in the same frame.
    pub fn view<Q: ViewSet>(&mut self, mut f: impl FnMut(Entity, Q::Item<'_>)) {
        let mut cols = Q::extract(&mut self.columns);
        for i in 0..self.entities.len() {
            let entity = self.entities[i];
            if Q::contains(&cols, entity) {
                f(entity, Q::fetch(&mut cols, entity));
            }
        }
        Q::restore(cols, &mut self.columns);
    }

    /// Materialize the ids of every entity that has all components in `Q`,
    /// in entity insertion order.
    ///
    /// Useful when two views have to be walked against each other — iterate
    /// the id lists and fetch through [`get`](Self::get)/[`get_mut`](Self::get_mut).
    pub fn entities<Q: ViewSet>(&self) -> Vec<Entity> {
        let ids = Q::type_ids();
        self.entities
            .iter()
            .copied()
            .filter(|entity| {
                ids.iter().all(|tid| {
                    self.columns
                        .get(tid)
                        .is_some_and(|column| column.contains(entity.index()))
                })
            })
            .collect()
    }

    // ── Resources ────────────────────────────────────────────────────

    /// Insert a resource (singleton). Replaces any existing resource of the
    /// same type.
    pub fn insert_resource<T: 'static>(&mut self, value: T) {
        self.resources.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Shared access to a resource.
    ///
    /// # Panics
    ///
    /// Panics if the resource was never inserted.
    pub fn resource<T: 'static>(&self) -> &T {
        self.get_resource().unwrap_or_else(|| {
            panic!(
                "resource `{}` not found; was it inserted?",
                std::any::type_name::<T>()
            )
        })
    }

    /// Exclusive access to a resource.
    ///
    /// # Panics
    ///
    /// Panics if the resource was never inserted.
    pub fn resource_mut<T: 'static>(&mut self) -> &mut T {
        self.get_resource_mut().unwrap_or_else(|| {
            panic!(
                "resource `{}` not found; was it inserted?",
                std::any::type_name::<T>()
            )
        })
    }

    pub fn get_resource<T: 'static>(&self) -> Option<&T> {
        self.resources
            .get(&TypeId::of::<T>())
            .and_then(|r| r.downcast_ref::<T>())
    }

    pub fn get_resource_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.resources
            .get_mut(&TypeId::of::<T>())
            .and_then(|r| r.downcast_mut::<T>())
    }

    /// Take a resource out of the store, returning ownership.
    ///
    /// This is the extract/reinsert pattern: systems that need a resource
    /// *and* a view over the same store in one pass remove the resource,
    /// do the work, and insert it back.
    pub fn remove_resource<T: 'static>(&mut self) -> Option<T> {
        self.resources
            .remove(&TypeId::of::<T>())
            .and_then(|r| r.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }
}

impl Default for ComponentStore {
    fn default() -> Self {
        Self::new()
    }
}
