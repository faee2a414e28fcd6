//! # View — Typed Filtered Iteration
//!
//! A view is how systems read and write components: name the component types
//! you need and the store walks every entity that has all of them, in entity
//! insertion order.
//!
//! ```ignore
//! store.view::<(&mut Transform, &Speed)>(|entity, (transform, speed)| {
//!     transform.position += speed.velocity;
//! });
//! ```
//!
//! Rust's `Iterator` trait can't express items that borrow from the iterator,
//! so views are closure-based. To hand the closure mutable references into
//! several columns at once, the needed columns are temporarily *extracted*
//! from the store's column map (giving owned, provably-disjoint access) and
//! restored when the pass ends. The same extraction is what makes structural
//! mutation of the store impossible mid-view.

use std::any::TypeId;
use std::collections::HashMap;

use super::column::Column;
use super::entity::Entity;

/// A set of component accesses a view fetches per entity.
///
/// Implemented for `&T` (shared) and `&mut T` (exclusive), and for tuples of
/// those up to eight elements, so `(&A, &mut B)` just works.
pub trait ViewSet {
    /// What the closure receives per matching entity.
    type Item<'c>;

    /// The column storage extracted from the store for the pass.
    type Columns;

    /// The component types this set requires.
    fn type_ids() -> Vec<TypeId>;

    /// Take the needed column(s) out of the store's column map.
    fn extract(columns: &mut HashMap<TypeId, Column>) -> Self::Columns;

    /// Put the column(s) back.
    fn restore(cols: Self::Columns, columns: &mut HashMap<TypeId, Column>);

    /// Whether `entity` has every component in the set.
    fn contains(cols: &Self::Columns, entity: Entity) -> bool;

    /// Fetch the item for `entity`. Callers must check [`contains`](Self::contains) first.
    fn fetch(cols: &mut Self::Columns, entity: Entity) -> Self::Item<'_>;
}

fn take_column<T: 'static>(columns: &mut HashMap<TypeId, Column>) -> (TypeId, Column) {
    let tid = TypeId::of::<T>();
    // A type no entity ever carried simply yields an empty column, so the
    // view matches nothing rather than erroring.
    let col = columns.remove(&tid).unwrap_or_default();
    (tid, col)
}

fn put_column(col: (TypeId, Column), columns: &mut HashMap<TypeId, Column>) {
    if !col.1.is_empty() {
        columns.insert(col.0, col.1);
    }
}

/// Shared access to one component type.
impl<T: 'static> ViewSet for &T {
    type Item<'c> = &'c T;
    type Columns = (TypeId, Column);

    fn type_ids() -> Vec<TypeId> {
        vec![TypeId::of::<T>()]
    }

    fn extract(columns: &mut HashMap<TypeId, Column>) -> Self::Columns {
        take_column::<T>(columns)
    }

    fn restore(cols: Self::Columns, columns: &mut HashMap<TypeId, Column>) {
        put_column(cols, columns);
    }

    fn contains(cols: &Self::Columns, entity: Entity) -> bool {
        cols.1.contains(entity.index())
    }

    fn fetch(cols: &mut Self::Columns, entity: Entity) -> Self::Item<'_> {
        cols.1.get::<T>(entity.index()).unwrap_or_else(|| {
            panic!(
                "view fetch: `{}` missing despite membership check",
                std::any::type_name::<T>()
            )
        })
    }
}

/// Exclusive access to one component type.
impl<T: 'static> ViewSet for &mut T {
    type Item<'c> = &'c mut T;
    type Columns = (TypeId, Column);

    fn type_ids() -> Vec<TypeId> {
        vec![TypeId::of::<T>()]
    }

    fn extract(columns: &mut HashMap<TypeId, Column>) -> Self::Columns {
        take_column::<T>(columns)
    }

    fn restore(cols: Self::Columns, columns: &mut HashMap<TypeId, Column>) {
        put_column(cols, columns);
    }

    fn contains(cols: &Self::Columns, entity: Entity) -> bool {
        cols.1.contains(entity.index())
    }

    fn fetch(cols: &mut Self::Columns, entity: Entity) -> Self::Item<'_> {
        cols.1.get_mut::<T>(entity.index()).unwrap_or_else(|| {
            panic!(
                "view fetch: `{}` missing despite membership check",
                std::any::type_name::<T>()
            )
        })
    }
}

macro_rules! impl_view_set_tuple {
    ($($V:ident),+) => {
        impl<$($V: ViewSet),+> ViewSet for ($($V,)+) {
            type Item<'c> = ($($V::Item<'c>,)+);
            type Columns = ($($V::Columns,)+);

            fn type_ids() -> Vec<TypeId> {
                let mut ids = Vec::new();
                $(ids.extend($V::type_ids());)+
                ids
            }

            #[allow(non_snake_case)]
            fn extract(columns: &mut HashMap<TypeId, Column>) -> Self::Columns {
                ($($V::extract(columns),)+)
            }

            #[allow(non_snake_case)]
            fn restore(cols: Self::Columns, columns: &mut HashMap<TypeId, Column>) {
                let ($($V,)+) = cols;
                $($V::restore($V, columns);)+
            }

            #[allow(non_snake_case)]
            fn contains(cols: &Self::Columns, entity: Entity) -> bool {
                let ($($V,)+) = cols;
                $($V::contains($V, entity) &&)+ true
            }

            #[allow(non_snake_case)]
            fn fetch(cols: &mut Self::Columns, entity: Entity) -> Self::Item<'_> {
                let ($($V,)+) = cols;
                ($($V::fetch($V, entity),)+)
            }
        }
    };
}

impl_view_set_tuple!(A);
impl_view_set_tuple!(A, B);
impl_view_set_tuple!(A, B, C);
impl_view_set_tuple!(A, B, C, D);
impl_view_set_tuple!(A, B, C, D, E);
impl_view_set_tuple!(A, B, C, D, E, F);
impl_view_set_tuple!(A, B, C, D, E, F, G);
impl_view_set_tuple!(A, B, C, D, E, F, G, H);
