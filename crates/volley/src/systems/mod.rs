//! The per-frame gameplay systems.
//!
//! Update ordering matters and is the caller's to get right when registering:
//! [`MovementSystem`] before [`CollisionSystem`] before [`BounceSystem`],
//! with [`SpriteAnimationSystem`] anywhere among them.

mod bounce;
mod collision;
mod movement;
mod player;
mod rect;
mod sprite;
mod tilemap;

pub use bounce::BounceSystem;
pub use collision::{Aabb, CollisionSystem};
pub use movement::MovementSystem;
pub use player::PlayerInputSystem;
pub use rect::RectRenderSystem;
pub use sprite::{SpriteAnimationSystem, SpriteRenderSystem, SpriteSetupSystem};
pub use tilemap::{TilemapRenderSystem, TilemapSetupSystem};
