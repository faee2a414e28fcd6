//! Velocity integration and boundary reflection.

use glam::Vec2;

use crate::components::{Size, Speed, Transform};
use crate::ecs::ComponentStore;
use crate::pipeline::{Tick, UpdateSystem};

/// Reflection amplification applied when a moving entity hits the left,
/// right, or top screen edge.
const BOUNCE_GAIN: f32 = -1.2;

/// Integrates position from velocity and applies the screen-edge policy.
///
/// For every entity with `Transform` + `Speed` + `Size` and a non-zero
/// velocity, the candidate position `p + v * dt` is tested against the
/// configured screen bounds:
///
/// - left/right/top edge: the matching velocity axis is reflected and
///   amplified by 1.2. Both horizontal conditions can fire in one step when
///   the entity is wider than the screen; they stack.
/// - bottom edge: the ball is lost — the pass stops with [`Tick::GameOver`]
///   and that entity's position is left uncommitted.
///
/// Bounds are tested against the *unreflected* candidate and the candidate is
/// what gets committed, so a reflected entity still moves outward on the
/// frame it hit the edge; the corrected velocity takes effect next frame.
pub struct MovementSystem {
    screen_width: f32,
    screen_height: f32,
}

impl MovementSystem {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width: screen_width as f32,
            screen_height: screen_height as f32,
        }
    }
}

impl UpdateSystem for MovementSystem {
    fn run(&mut self, store: &mut ComponentStore, dt: f32) -> Tick {
        let (screen_w, screen_h) = (self.screen_width, self.screen_height);
        let mut tick = Tick::Continue;

        store.view::<(&mut Transform, &mut Speed, &Size)>(|_, (transform, speed, size)| {
            if tick == Tick::GameOver {
                return;
            }
            if speed.velocity == Vec2::ZERO {
                return;
            }

            let nx = transform.position.x + speed.velocity.x * dt;
            let ny = transform.position.y + speed.velocity.y * dt;

            if nx <= 0.0 {
                speed.velocity.x *= BOUNCE_GAIN;
            }
            if nx + size.width as f32 >= screen_w {
                speed.velocity.x *= BOUNCE_GAIN;
            }
            if ny <= 0.0 {
                speed.velocity.y *= BOUNCE_GAIN;
            }
            if ny + size.height as f32 > screen_h {
                // Lost past the bottom: signal and leave the position alone.
                tick = Tick::GameOver;
                return;
            }

            transform.position.x = nx;
            transform.position.y = ny;
        });

        tick
    }
}
