//! Collision response: velocity transfer and vertical bounce.

use crate::components::{Collider, Speed, Transform};
use crate::ecs::ComponentStore;
use crate::pipeline::{Tick, UpdateSystem};

/// Vertical reflection amplification applied on a triggered collision.
const RESPONSE_GAIN: f32 = -1.5;

/// Consumes collision flags raised by
/// [`CollisionSystem`](super::CollisionSystem).
///
/// For every `Transform` + `Speed` + `Collider` entity whose `triggered` flag
/// is set: the vertical velocity reflects and amplifies by 1.5, the recorded
/// `transfer_speed` adds onto the horizontal velocity, and the flag clears.
/// This system is the sole clearer of `triggered` and must run after
/// detection in the same frame — register it later.
pub struct BounceSystem;

impl UpdateSystem for BounceSystem {
    fn run(&mut self, store: &mut ComponentStore, _dt: f32) -> Tick {
        store.view::<(&Transform, &mut Speed, &mut Collider)>(|_, (_, speed, collider)| {
            if collider.triggered {
                speed.velocity.y *= RESPONSE_GAIN;
                speed.velocity.x += collider.transfer_speed;
                collider.triggered = false;
            }
        });
        Tick::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Size;
    use crate::systems::CollisionSystem;

    #[test]
    fn triggered_collider_bounces_and_clears() {
        let mut store = ComponentStore::new();
        let e = store.spawn_empty();
        store.insert(e, Transform::from_xy(0.0, 0.0)).unwrap();
        store.insert(e, Speed::new(2.0, 3.0)).unwrap();
        store
            .insert(
                e,
                Collider {
                    triggered: true,
                    transfer_speed: 1.5,
                },
            )
            .unwrap();

        assert_eq!(BounceSystem.run(&mut store, 1.0), Tick::Continue);

        let speed = store.get::<Speed>(e).unwrap();
        assert_eq!(speed.velocity.y, -4.5);
        assert_eq!(speed.velocity.x, 3.5);
        assert!(!store.get::<Collider>(e).unwrap().triggered);
    }

    #[test]
    fn untriggered_collider_is_untouched() {
        let mut store = ComponentStore::new();
        let e = store.spawn_empty();
        store.insert(e, Transform::from_xy(0.0, 0.0)).unwrap();
        store.insert(e, Speed::new(2.0, 3.0)).unwrap();
        store.insert(e, Collider::default()).unwrap();

        assert_eq!(BounceSystem.run(&mut store, 1.0), Tick::Continue);
        let speed = store.get::<Speed>(e).unwrap();
        assert_eq!((speed.velocity.x, speed.velocity.y), (2.0, 3.0));
    }

    #[test]
    fn detection_then_response_applies_exactly_once() {
        let mut store = ComponentStore::new();
        // A paddle-like collider that also moves...
        let paddle = store.spawn_empty();
        store.insert(paddle, Transform::from_xy(0.0, 0.0)).unwrap();
        store.insert(paddle, Size::new(10, 10)).unwrap();
        store.insert(paddle, Collider::default()).unwrap();
        store.insert(paddle, Speed::new(0.0, 2.0)).unwrap();
        // ...and an overlapping ball.
        let ball = store.spawn_empty();
        store.insert(ball, Transform::from_xy(5.0, 5.0)).unwrap();
        store.insert(ball, Size::new(10, 10)).unwrap();
        store.insert(ball, Speed::new(4.0, -1.0)).unwrap();

        assert_eq!(CollisionSystem.run(&mut store, 1.0), Tick::Continue);
        let before = *store.get::<Speed>(paddle).unwrap();
        assert!(store.get::<Collider>(paddle).unwrap().triggered);

        assert_eq!(BounceSystem.run(&mut store, 1.0), Tick::Continue);

        let after = store.get::<Speed>(paddle).unwrap();
        // vx gained exactly the recorded transfer speed, vy reflected by 1.5.
        assert_eq!(after.velocity.x, before.velocity.x + 4.0);
        assert_eq!(after.velocity.y, before.velocity.y * -1.5);
        assert!(!store.get::<Collider>(paddle).unwrap().triggered);

        // A second response pass with no new detection is a no-op.
        let settled = *after;
        assert_eq!(BounceSystem.run(&mut store, 1.0), Tick::Continue);
        assert_eq!(*store.get::<Speed>(paddle).unwrap(), settled);
    }
}
