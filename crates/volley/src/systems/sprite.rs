//! Sprite texture lifecycle, animation stepping, and drawing.

use crate::components::{Sprite, Transform};
use crate::ecs::ComponentStore;
use crate::error::SetupError;
use crate::gfx::{RenderTarget, Textures};
use crate::pipeline::{RenderSystem, SetupSystem, Tick, UpdateSystem};
use crate::time::Time;

/// Loads every sprite's texture variant during scene setup and unloads the
/// same set at teardown.
///
/// The load and unload passes walk the same view with the same
/// `(name, remap name)` keys, so acquisition and release stay symmetric by
/// construction. A failed load aborts scene construction.
pub struct SpriteSetupSystem;

/// The `(texture, remap)` keys of every sprite currently in the store.
fn sprite_keys(store: &mut ComponentStore) -> Vec<(String, Option<String>)> {
    let mut keys = Vec::new();
    store.view::<(&Sprite,)>(|_, (sprite,)| {
        keys.push((
            sprite.texture.clone(),
            sprite.remap_name().map(str::to_string),
        ));
    });
    keys
}

impl SetupSystem for SpriteSetupSystem {
    fn run(&mut self, store: &mut ComponentStore) -> Result<(), SetupError> {
        let mut remaps = Vec::new();
        store.view::<(&Sprite,)>(|_, (sprite,)| {
            remaps.push((sprite.texture.clone(), sprite.remap.clone()));
        });

        let Some(Textures(mut textures)) = store.remove_resource::<Textures>() else {
            return Err(SetupError::MissingTextures);
        };

        let mut result = Ok(());
        for (name, remap) in &remaps {
            log::debug!("loading sprite texture `{name}`");
            if let Err(source) = textures.load(name, remap.as_ref()) {
                result = Err(SetupError::Texture {
                    name: name.clone(),
                    source,
                });
                break;
            }
        }

        store.insert_resource(Textures(textures));
        result
    }

    fn teardown(&mut self, store: &mut ComponentStore) {
        let keys = sprite_keys(store);
        let Some(Textures(mut textures)) = store.remove_resource::<Textures>() else {
            return;
        };
        for (name, remap_name) in &keys {
            log::debug!("unloading sprite texture `{name}`");
            textures.unload(name, remap_name.as_deref());
        }
        store.insert_resource(Textures(textures));
    }
}

/// Advances every animated sprite against the scene clock.
pub struct SpriteAnimationSystem;

impl UpdateSystem for SpriteAnimationSystem {
    fn run(&mut self, store: &mut ComponentStore, _dt: f32) -> Tick {
        let now_ms = store.resource::<Time>().elapsed_ms();
        store.view::<(&mut Sprite,)>(|_, (sprite,)| {
            sprite.step_animation(now_ms);
        });
        Tick::Continue
    }
}

/// Draws every `Transform` + `Sprite` entity.
///
/// The current frame's clip rectangle comes from the sprite's indices; the
/// destination square is `frame_size * scale` at the entity position.
pub struct SpriteRenderSystem {
    scale: u32,
}

impl SpriteRenderSystem {
    pub fn new(scale: u32) -> Self {
        Self { scale }
    }
}

impl RenderSystem for SpriteRenderSystem {
    fn run(&mut self, store: &mut ComponentStore, target: &mut dyn RenderTarget) {
        let Some(Textures(textures)) = store.remove_resource::<Textures>() else {
            return;
        };
        let scale = self.scale;
        store.view::<(&Transform, &Sprite)>(|_, (transform, sprite)| {
            if let Some(texture) = textures.get(&sprite.texture, sprite.remap_name()) {
                let dest = sprite.frame_size * scale;
                texture.render(
                    target,
                    transform.position.x,
                    transform.position.y,
                    dest,
                    dest,
                    Some(sprite.clip()),
                );
            }
        });
        store.insert_resource(Textures(textures));
    }
}
