//! Solid-rectangle debug renderer.

use crate::components::{Size, Transform};
use crate::ecs::ComponentStore;
use crate::gfx::{Color, RenderTarget};
use crate::pipeline::RenderSystem;

/// Fills every `Transform` + `Size` box white. Handy while textures aren't
/// wired up yet.
pub struct RectRenderSystem;

impl RenderSystem for RectRenderSystem {
    fn run(&mut self, store: &mut ComponentStore, target: &mut dyn RenderTarget) {
        store.view::<(&Transform, &Size)>(|_, (transform, size)| {
            target.fill_rect(
                transform.position.x as i32,
                transform.position.y as i32,
                size.width,
                size.height,
                Color::WHITE,
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingTarget {
        rects: Vec<(i32, i32, u32, u32)>,
    }

    impl RenderTarget for RecordingTarget {
        fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
            assert_eq!(color, Color::WHITE);
            self.rects.push((x, y, w, h));
        }
    }

    #[test]
    fn fills_one_rect_per_sized_entity() {
        let mut store = ComponentStore::new();
        let a = store.spawn_empty();
        store.insert(a, Transform::from_xy(1.5, 2.5)).unwrap();
        store.insert(a, Size::new(10, 20)).unwrap();
        let b = store.spawn_empty();
        store.insert(b, Transform::from_xy(30.0, 40.0)).unwrap();
        store.insert(b, Size::new(5, 5)).unwrap();
        // No Size: not drawn.
        let c = store.spawn_empty();
        store.insert(c, Transform::from_xy(0.0, 0.0)).unwrap();

        let mut target = RecordingTarget::default();
        RectRenderSystem.run(&mut store, &mut target);
        assert_eq!(target.rects, [(1, 2, 10, 20), (30, 40, 5, 5)]);
    }
}
