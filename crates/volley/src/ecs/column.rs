//! # Column — Type-Erased Component Cells
//!
//! One [`Column`] exists per component *type* and maps entity index → boxed
//! component. The store can't use `HashMap<u32, T>` because it only knows the
//! component's [`TypeId`](std::any::TypeId) at runtime, so each cell is a
//! `Box<dyn Any>` and typed access goes through `downcast_ref`/`downcast_mut`.
//!
//! This trades cache locality for zero `unsafe` — the right call for a store
//! that holds a few dozen entities, not a few hundred thousand. A downcast
//! mismatch means the store filed a cell under the wrong `TypeId`, which is a
//! framework bug, so it panics with the expected type name.

use std::any::Any;
use std::collections::HashMap;

/// A type-erased column of components for a single component type, keyed by
/// entity index. Opaque outside the crate; users go through
/// [`ComponentStore`](super::store::ComponentStore).
pub struct Column {
    cells: HashMap<u32, Box<dyn Any>>,
}

impl Column {
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }

    /// Whether the entity at `index` has a cell in this column.
    pub fn contains(&self, index: u32) -> bool {
        self.cells.contains_key(&index)
    }

    /// Insert a boxed component, returning the previous cell if one existed.
    pub fn insert(&mut self, index: u32, value: Box<dyn Any>) -> Option<Box<dyn Any>> {
        self.cells.insert(index, value)
    }

    /// Remove and return the cell for `index`, if present.
    pub fn remove(&mut self, index: u32) -> Option<Box<dyn Any>> {
        self.cells.remove(&index)
    }

    /// Typed shared access to the cell for `index`.
    ///
    /// # Panics
    ///
    /// Panics if the cell exists but holds a different type.
    pub fn get<T: 'static>(&self, index: u32) -> Option<&T> {
        self.cells.get(&index).map(|cell| {
            cell.downcast_ref().unwrap_or_else(|| {
                panic!(
                    "component column mismatch: expected `{}`",
                    std::any::type_name::<T>()
                )
            })
        })
    }

    /// Typed exclusive access to the cell for `index`.
    ///
    /// # Panics
    ///
    /// Panics if the cell exists but holds a different type.
    pub fn get_mut<T: 'static>(&mut self, index: u32) -> Option<&mut T> {
        self.cells.get_mut(&index).map(|cell| {
            cell.downcast_mut().unwrap_or_else(|| {
                panic!(
                    "component column mismatch: expected `{}`",
                    std::any::type_name::<T>()
                )
            })
        })
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.cells.len()
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut col = Column::new();
        col.insert(0, Box::new(1.5f32));
        col.insert(3, Box::new(2.5f32));
        assert_eq!(col.get::<f32>(0), Some(&1.5));
        assert_eq!(col.get::<f32>(3), Some(&2.5));
        assert_eq!(col.get::<f32>(1), None);
        assert_eq!(col.len(), 2);
    }

    #[test]
    fn insert_returns_previous_cell() {
        let mut col = Column::new();
        assert!(col.insert(0, Box::new(10u32)).is_none());
        let old = col.insert(0, Box::new(20u32)).unwrap();
        assert_eq!(*old.downcast::<u32>().unwrap(), 10);
        assert_eq!(col.get::<u32>(0), Some(&20));
    }

    #[test]
    fn remove_drops_membership() {
        let mut col = Column::new();
        col.insert(7, Box::new(String::from("ball")));
        assert!(col.contains(7));
        let taken = col.remove(7).unwrap();
        assert_eq!(*taken.downcast::<String>().unwrap(), "ball");
        assert!(!col.contains(7));
        assert!(col.is_empty());
    }

    #[test]
    fn get_mut_mutates_in_place() {
        let mut col = Column::new();
        col.insert(0, Box::new(5u32));
        *col.get_mut::<u32>(0).unwrap() = 9;
        assert_eq!(col.get::<u32>(0), Some(&9));
    }

    #[test]
    #[should_panic(expected = "component column mismatch")]
    fn type_mismatch_panics() {
        let mut col = Column::new();
        col.insert(0, Box::new(1u32));
        let _ = col.get::<f64>(0);
    }
}
