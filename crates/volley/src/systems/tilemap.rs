//! Tilemap installation and drawing.

use std::collections::HashSet;

use crate::ecs::ComponentStore;
use crate::error::SetupError;
use crate::gfx::{RenderTarget, Textures};
use crate::pipeline::{RenderSystem, SetupSystem};
use crate::tilemap::Tilemap;

/// Installs a tilemap into the scene's world singleton slot and loads its
/// tile textures.
///
/// The map resource is installed *before* the textures load, so the paired
/// teardown always sees the cells it has to unload — even when a load fails
/// partway and scene construction aborts.
pub struct TilemapSetupSystem {
    map: Option<Tilemap>,
}

impl TilemapSetupSystem {
    pub fn new(map: Tilemap) -> Self {
        Self { map: Some(map) }
    }
}

fn distinct_cell_names(map: &Tilemap) -> Vec<String> {
    let mut seen = HashSet::new();
    map.cells()
        .iter()
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}

impl SetupSystem for TilemapSetupSystem {
    fn run(&mut self, store: &mut ComponentStore) -> Result<(), SetupError> {
        let Some(map) = self.map.take() else {
            return Ok(());
        };
        let names = distinct_cell_names(&map);
        log::debug!(
            "installing {}x{} tilemap, {} tile texture(s)",
            map.width(),
            map.height(),
            names.len()
        );
        store.insert_resource(map);

        let Some(Textures(mut textures)) = store.remove_resource::<Textures>() else {
            return Err(SetupError::MissingTextures);
        };
        let mut result = Ok(());
        for name in &names {
            if let Err(source) = textures.load(name, None) {
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
        let names = store
            .get_resource::<Tilemap>()
            .map(distinct_cell_names)
            .unwrap_or_default();
        let Some(Textures(mut textures)) = store.remove_resource::<Textures>() else {
            return;
        };
        for name in &names {
            textures.unload(name, None);
        }
        store.insert_resource(Textures(textures));
    }
}

/// Draws the world tilemap, row-major, each tile at `tile_size * scale`.
pub struct TilemapRenderSystem {
    scale: u32,
}

impl TilemapRenderSystem {
    pub fn new(scale: u32) -> Self {
        Self { scale }
    }
}

impl RenderSystem for TilemapRenderSystem {
    fn run(&mut self, store: &mut ComponentStore, target: &mut dyn RenderTarget) {
        let Some(Textures(textures)) = store.remove_resource::<Textures>() else {
            return;
        };
        if let Some(map) = store.get_resource::<Tilemap>() {
            let size = map.tile_size() * self.scale;
            for y in 0..map.height() {
                for x in 0..map.width() {
                    if let Some(texture) = textures.get(map.cell(x, y), None) {
                        texture.render(
                            target,
                            (x * size) as f32,
                            (y * size) as f32,
                            size,
                            size,
                            None,
                        );
                    }
                }
            }
        }
        store.insert_resource(Textures(textures));
    }
}
