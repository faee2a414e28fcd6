//! Pong without a window.
//!
//! Stands in for the host application: assembles the gameplay scene, pumps
//! frames against stub graphics, feeds a scripted burst of key events, and
//! reacts to the game-over signal. Run with `RUST_LOG=debug` to watch the
//! scene lifecycle.

use std::collections::HashSet;

use volley::prelude::*;

const SCREEN_WIDTH: u32 = 640;
const SCREEN_HEIGHT: u32 = 480;

/// Counts draw calls instead of drawing.
#[derive(Default)]
struct HeadlessTarget {
    rects: u32,
}

impl RenderTarget for HeadlessTarget {
    fn fill_rect(&mut self, _x: i32, _y: i32, _w: u32, _h: u32, _color: Color) {
        self.rects += 1;
    }
}

struct StubTexture;

impl Texture for StubTexture {
    fn render(
        &self,
        _target: &mut dyn RenderTarget,
        _x: f32,
        _y: f32,
        _dest_w: u32,
        _dest_h: u32,
        _clip: Option<ClipRect>,
    ) {
    }
}

/// Tracks load/unload keys the way a real texture manager would, without
/// touching the filesystem.
struct StubTextures {
    loaded: HashSet<(String, Option<String>)>,
    texture: StubTexture,
}

impl StubTextures {
    fn new() -> Self {
        Self {
            loaded: HashSet::new(),
            texture: StubTexture,
        }
    }
}

impl TextureStore for StubTextures {
    fn load(&mut self, name: &str, remap: Option<&ColorRemap>) -> Result<(), ResourceError> {
        let key = (name.to_string(), remap.map(|r| r.name.clone()));
        log::info!("loaded texture {key:?}");
        self.loaded.insert(key);
        Ok(())
    }

    fn unload(&mut self, name: &str, remap_name: Option<&str>) {
        let key = (name.to_string(), remap_name.map(str::to_string));
        log::info!("unloaded texture {key:?}");
        self.loaded.remove(&key);
    }

    fn get(&self, name: &str, remap_name: Option<&str>) -> Option<&dyn Texture> {
        let key = (name.to_string(), remap_name.map(str::to_string));
        self.loaded
            .contains(&key)
            .then_some(&self.texture as &dyn Texture)
    }
}

fn build_scene() -> Scene {
    let mut scene = Scene::new("gameplay");
    scene
        .store
        .insert_resource(Textures(Box::new(StubTextures::new())));

    let layout = [0, 1, 0, 0, 1, 0, 0, 0, 1];
    let cells = layout
        .iter()
        .map(|&c| {
            if c == 0 {
                "Tiles/Grass.png".to_string()
            } else {
                "Tiles/Water.png".to_string()
            }
        })
        .collect();
    let map = Tilemap::new(3, 3, 16, cells).expect("3x3 layout");

    scene
        .create_entity("cat1", 0.0, 0.0)
        .insert(Sprite::animated("Sprites/Cat/SpriteSheet.png", 48, 8, 1000.0));
    scene.create_entity("cat2", 40.0, 0.0).insert(
        Sprite::animated("Sprites/Cat/SpriteSheet.png", 48, 8, 1000.0).with_remap(
            ColorRemap::new("red", |color| {
                if color == 0xF3F2C0FF { 0xD2B48CFF } else { color }
            }),
        ),
    );

    scene
        .create_entity("paddle", 270.0, 440.0)
        .insert(Size::new(100, 20))
        .insert(Speed::zero())
        .insert(Player { move_speed: 200.0 });
    scene
        .create_entity("ball", 320.0, 120.0)
        .insert(Size::new(16, 16))
        .insert(Speed::new(90.0, 120.0))
        .insert(Collider::default());

    scene.add_setup_system(TilemapSetupSystem::new(map));
    scene.add_setup_system(SpriteSetupSystem);

    scene.add_event_system(PlayerInputSystem);

    // Movement before detection before response; animation last.
    scene.add_update_system(MovementSystem::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    scene.add_update_system(CollisionSystem);
    scene.add_update_system(BounceSystem);
    scene.add_update_system(SpriteAnimationSystem);

    scene.add_render_system(TilemapRenderSystem::new(5));
    scene.add_render_system(SpriteRenderSystem::new(5));
    scene.add_render_system(RectRenderSystem);

    scene
}

fn main() {
    env_logger::init();

    let mut scene = build_scene();
    if let Err(err) = scene.setup() {
        eprintln!("scene setup failed: {err}");
        std::process::exit(1);
    }

    // (frame, event) pairs playing the part of the window's event queue.
    let script = [
        (30, InputEvent::KeyDown(Key::Left)),
        (90, InputEvent::KeyUp(Key::Left)),
        (120, InputEvent::KeyDown(Key::Right)),
        (200, InputEvent::KeyUp(Key::Right)),
    ];

    let mut target = HeadlessTarget::default();
    let dt = 1.0 / 60.0;
    let mut frame = 0u32;

    let outcome = loop {
        for (at, event) in &script {
            if *at == frame {
                scene.handle_event(event);
            }
        }
        if scene.update(dt) == Tick::GameOver {
            break "ball lost past the bottom edge";
        }
        scene.render(&mut target);
        frame += 1;
        if frame == 50_000 {
            break "frame cap reached";
        }
    };

    println!(
        "game over after {frame} frames ({outcome}); {} rects filled",
        target.rects
    );
    scene.teardown();
}
