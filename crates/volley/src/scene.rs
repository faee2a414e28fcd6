//! # Scene — The Owning Aggregate
//!
//! A [`Scene`] owns one [`ComponentStore`] and one [`SystemPipeline`] and is
//! the unit of setup and teardown. The host constructs it, registers systems
//! and entities, runs [`setup`](Scene::setup) once, then drives
//! [`update`](Scene::update) / [`render`](Scene::render) /
//! [`handle_event`](Scene::handle_event) every frame until `update` reports
//! [`Tick::GameOver`].
//!
//! The scene seeds two resources at creation: the [`Time`] clock and the
//! world's singleton [`Tilemap`] slot (empty until a setup system fills it).
//! Resources acquired by setup systems are released by their paired teardown
//! hooks, in reverse registration order — on the host's explicit
//! [`teardown`](Scene::teardown) call, or from `Drop` if the host unwinds
//! without one.

use crate::components::Transform;
use crate::ecs::{ComponentStore, Entity};
use crate::error::SceneError;
use crate::gfx::RenderTarget;
use crate::input::InputEvent;
use crate::pipeline::{EventSystem, RenderSystem, SetupSystem, SystemPipeline, Tick, UpdateSystem};
use crate::tilemap::Tilemap;
use crate::time::Time;

/// One simulation world: a component store, a system pipeline, and the
/// world singleton slot.
pub struct Scene {
    name: String,
    pub store: ComponentStore,
    pipeline: SystemPipeline,
    set_up: bool,
    torn_down: bool,
}

impl Scene {
    pub fn new(name: &str) -> Self {
        let mut store = ComponentStore::new();
        store.insert_resource(Time::new());
        store.insert_resource(Tilemap::default());
        log::debug!("scene `{name}` created");
        Self {
            name: name.to_string(),
            store,
            pipeline: SystemPipeline::new(),
            set_up: false,
            torn_down: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a named entity seeded with a [`Transform`] at `(x, y)`.
    ///
    /// Returns a builder for attaching further components.
    ///
    /// # Panics
    ///
    /// Panics if the name is already taken — entity names are per-scene
    /// unique and reusing one is a configuration bug.
    pub fn create_entity(&mut self, name: &str, x: f32, y: f32) -> EntityBuilder<'_> {
        let entity = self.store.spawn_empty();
        if let Err(err) = self.store.name_entity(entity, name) {
            panic!("create_entity: {err}");
        }
        if let Err(err) = self.store.insert(entity, Transform::from_xy(x, y)) {
            panic!("create_entity: {err}");
        }
        EntityBuilder {
            store: &mut self.store,
            entity,
        }
    }

    // ── System registration (order is the execution order) ───────────

    pub fn add_setup_system<S: SetupSystem + 'static>(&mut self, system: S) {
        self.pipeline.add_setup(system);
    }

    pub fn add_update_system<S: UpdateSystem + 'static>(&mut self, system: S) {
        self.pipeline.add_update(system);
    }

    pub fn add_render_system<S: RenderSystem + 'static>(&mut self, system: S) {
        self.pipeline.add_render(system);
    }

    pub fn add_event_system<S: EventSystem + 'static>(&mut self, system: S) {
        self.pipeline.add_event(system);
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Run all setup systems once, in registration order.
    ///
    /// A failing setup system aborts scene construction: the teardown hooks
    /// run immediately (in reverse order) and the scene is left unusable —
    /// there are no partial scenes.
    pub fn setup(&mut self) -> Result<(), SceneError> {
        if self.set_up || self.torn_down {
            return Err(SceneError::AlreadySetUp);
        }
        log::info!("scene `{}`: setup", self.name);
        match self.pipeline.run_setup(&mut self.store) {
            Ok(()) => {
                self.set_up = true;
                Ok(())
            }
            Err(err) => {
                log::error!("scene `{}`: setup failed: {err}", self.name);
                self.teardown();
                Err(SceneError::Setup(err))
            }
        }
    }

    /// Advance the clock and run all update systems in registration order.
    ///
    /// Returns [`Tick::GameOver`] when a system signals the simulation is
    /// over; the remaining update systems are skipped for that frame and the
    /// host should stop the loop and tear the scene down.
    pub fn update(&mut self, dt: f32) -> Tick {
        self.store.resource_mut::<Time>().update();
        let tick = self.pipeline.run_update(&mut self.store, dt);
        if tick == Tick::GameOver {
            log::info!("scene `{}`: simulation over", self.name);
        }
        tick
    }

    /// Run all render systems in registration order.
    pub fn render(&mut self, target: &mut dyn RenderTarget) {
        self.pipeline.run_render(&mut self.store, target);
    }

    /// Dispatch one input event to all event systems in registration order.
    pub fn handle_event(&mut self, event: &InputEvent) {
        self.pipeline.run_event(&mut self.store, event);
    }

    /// Run every setup system's teardown hook in reverse registration order.
    ///
    /// Idempotent; also invoked from `Drop`, so acquired resources are
    /// released even if the host never calls this explicitly.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        log::info!("scene `{}`: teardown", self.name);
        self.pipeline.teardown(&mut self.store);
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Builder for attaching components to a freshly created entity.
pub struct EntityBuilder<'s> {
    store: &'s mut ComponentStore,
    entity: Entity,
}

impl EntityBuilder<'_> {
    /// Attach a component.
    ///
    /// # Panics
    ///
    /// Panics if the entity already has a component of this type — the
    /// builder only ever targets a fresh entity, so a duplicate is a
    /// configuration bug at this call site. Use
    /// [`ComponentStore::replace`] for intentional overwrites.
    pub fn insert<T: 'static>(self, component: T) -> Self {
        if let Err(err) = self.store.insert(self.entity, component) {
            panic!("EntityBuilder::insert: {err}");
        }
        self
    }

    pub fn id(&self) -> Entity {
        self.entity
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::components::{Size, Speed};
    use crate::error::SetupError;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        label: &'static str,
        log: Log,
        fail: bool,
    }

    impl SetupSystem for Recorder {
        fn run(&mut self, _store: &mut ComponentStore) -> Result<(), SetupError> {
            self.log.borrow_mut().push(format!("setup:{}", self.label));
            if self.fail {
                Err(SetupError::Other("boom".into()))
            } else {
                Ok(())
            }
        }

        fn teardown(&mut self, _store: &mut ComponentStore) {
            self.log.borrow_mut().push(format!("teardown:{}", self.label));
        }
    }

    fn recorder(label: &'static str, log: &Log) -> Recorder {
        Recorder {
            label,
            log: Rc::clone(log),
            fail: false,
        }
    }

    #[test]
    fn create_entity_seeds_name_and_transform() {
        let mut scene = Scene::new("test");
        let ball = scene
            .create_entity("ball", 10.0, 20.0)
            .insert(Speed::new(1.0, 0.0))
            .insert(Size::new(8, 8))
            .id();

        assert_eq!(scene.store.named("ball"), Some(ball));
        let transform = scene.store.get::<Transform>(ball).unwrap();
        assert_eq!(transform.position.x, 10.0);
        assert_eq!(transform.position.y, 20.0);
        assert!(scene.store.get::<Speed>(ball).is_some());
    }

    #[test]
    #[should_panic(expected = "already taken")]
    fn duplicate_entity_name_panics() {
        let mut scene = Scene::new("test");
        scene.create_entity("ball", 0.0, 0.0);
        scene.create_entity("ball", 1.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "already has")]
    fn duplicate_component_through_builder_panics() {
        let mut scene = Scene::new("test");
        scene
            .create_entity("ball", 0.0, 0.0)
            .insert(Speed::zero())
            .insert(Speed::new(1.0, 1.0));
    }

    #[test]
    fn scene_seeds_time_and_tilemap() {
        let scene = Scene::new("test");
        assert!(scene.store.get_resource::<Time>().is_some());
        assert!(scene.store.get_resource::<Tilemap>().unwrap().is_empty());
    }

    #[test]
    fn setup_twice_is_an_error() {
        let mut scene = Scene::new("test");
        scene.setup().unwrap();
        assert!(matches!(scene.setup(), Err(SceneError::AlreadySetUp)));
    }

    #[test]
    fn failed_setup_tears_down_in_reverse_and_aborts() {
        let log: Log = Rc::default();
        let mut scene = Scene::new("test");
        scene.add_setup_system(recorder("a", &log));
        scene.add_setup_system(Recorder {
            label: "b",
            log: Rc::clone(&log),
            fail: true,
        });
        scene.add_setup_system(recorder("c", &log));

        assert!(matches!(scene.setup(), Err(SceneError::Setup(_))));
        assert_eq!(
            *log.borrow(),
            ["setup:a", "setup:b", "teardown:c", "teardown:b", "teardown:a"]
        );

        // The scene is unusable now; teardown must not run again on drop.
        drop(scene);
        assert_eq!(log.borrow().len(), 5);
    }

    #[test]
    fn drop_runs_teardown_once_in_reverse_order() {
        let log: Log = Rc::default();
        {
            let mut scene = Scene::new("test");
            scene.add_setup_system(recorder("a", &log));
            scene.add_setup_system(recorder("b", &log));
            scene.setup().unwrap();
            log.borrow_mut().clear();
        }
        assert_eq!(*log.borrow(), ["teardown:b", "teardown:a"]);
    }

    #[test]
    fn explicit_teardown_preempts_drop() {
        let log: Log = Rc::default();
        let mut scene = Scene::new("test");
        scene.add_setup_system(recorder("a", &log));
        scene.setup().unwrap();

        scene.teardown();
        scene.teardown();
        drop(scene);
        // setup:a then exactly one teardown:a.
        assert_eq!(*log.borrow(), ["setup:a", "teardown:a"]);
    }

    #[test]
    fn update_advances_time_and_propagates_game_over() {
        let mut scene = Scene::new("test");
        scene.add_update_system(|_: &mut ComponentStore, _dt: f32| Tick::Continue);
        assert_eq!(scene.update(0.016), Tick::Continue);
        assert_eq!(scene.store.resource::<Time>().frame_count(), 1);

        scene.add_update_system(|_: &mut ComponentStore, _dt: f32| Tick::GameOver);
        assert_eq!(scene.update(0.016), Tick::GameOver);
    }
}
