//! Pairwise AABB collision detection.

use glam::Vec2;

use crate::components::{Collider, Size, Speed, Transform};
use crate::ecs::{ComponentStore, Entity};
use crate::pipeline::{Tick, UpdateSystem};

/// An axis-aligned bounding box, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(top_left: Vec2, size: Size) -> Self {
        Self {
            min: top_left,
            max: top_left + Vec2::new(size.width as f32, size.height as f32),
        }
    }

    /// Rectangle overlap test. Touching edges count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

/// Tests every collider-carrying entity against every mover and flags hits.
///
/// Colliders are entities with `Transform` + `Size` + `Collider`; movers are
/// entities with `Transform` + `Speed` + `Size`. Each pair (minus an entity
/// against itself) gets an AABB overlap test; on overlap the collider's
/// `triggered` flag is set and the mover's horizontal speed is recorded as
/// `transfer_speed`. When several movers overlap one collider in a pass, the
/// last one evaluated wins — there is no accumulation.
///
/// The two id lists are materialized up front and walked with plain nested
/// loops; O(colliders × movers) is fine at this entity count.
pub struct CollisionSystem;

fn aabb_of(store: &ComponentStore, entity: Entity) -> Option<Aabb> {
    let transform = store.get::<Transform>(entity)?;
    let size = store.get::<Size>(entity)?;
    Some(Aabb::new(transform.position, *size))
}

impl UpdateSystem for CollisionSystem {
    fn run(&mut self, store: &mut ComponentStore, _dt: f32) -> Tick {
        let colliders = store.entities::<(&Transform, &Size, &Collider)>();
        let movers = store.entities::<(&Transform, &Speed, &Size)>();

        for &collider in &colliders {
            let Some(collider_box) = aabb_of(store, collider) else {
                continue;
            };
            for &mover in &movers {
                if mover == collider {
                    continue;
                }
                let Some(mover_box) = aabb_of(store, mover) else {
                    continue;
                };
                if collider_box.intersects(&mover_box) {
                    let transfer = store
                        .get::<Speed>(mover)
                        .map_or(0.0, |speed| speed.velocity.x);
                    if let Some(flag) = store.get_mut::<Collider>(collider) {
                        flag.triggered = true;
                        flag.transfer_speed = transfer;
                    }
                }
            }
        }

        Tick::Continue
    }
}
