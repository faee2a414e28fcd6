//! Convenience re-exports — `use volley::prelude::*` for the common items.

pub use crate::components::{Collider, Player, Size, Speed, Sprite, Transform};
pub use crate::ecs::{ComponentStore, Entity};
pub use crate::error::{ResourceError, SceneError, SetupError, StoreError, TilemapError};
pub use crate::gfx::{ClipRect, Color, ColorRemap, RenderTarget, Texture, TextureStore, Textures};
pub use crate::input::{InputEvent, Key};
pub use crate::pipeline::{
    EventSystem, RenderSystem, SetupSystem, SystemPipeline, Tick, UpdateSystem,
};
pub use crate::scene::{EntityBuilder, Scene};
pub use crate::systems::{
    BounceSystem, CollisionSystem, MovementSystem, PlayerInputSystem, RectRenderSystem,
    SpriteAnimationSystem, SpriteRenderSystem, SpriteSetupSystem, TilemapRenderSystem,
    TilemapSetupSystem,
};
pub use crate::tilemap::Tilemap;
pub use crate::time::Time;

pub use glam::Vec2;
