//! # System Pipeline — Lifecycle Scheduling
//!
//! A system is a unit of behavior invoked at a defined point of the frame.
//! There are four closed kinds, one trait each:
//!
//! - [`SetupSystem`] — runs once before the first frame; its paired
//!   [`teardown`](SetupSystem::teardown) hook runs once at scene destruction.
//! - [`UpdateSystem`] — runs every frame with the caller's `dt`, and reports
//!   whether the simulation continues via [`Tick`].
//! - [`RenderSystem`] — runs every frame after all updates, given the opaque
//!   render target. Render systems read components, they don't write them.
//! - [`EventSystem`] — runs once per input event, whenever the host
//!   dispatches one.
//!
//! The pipeline stores one ordered list per kind and invokes in registration
//! order — it never reorders. Ordering between update systems is meaningful
//! (movement before collision detection before bounce response) and is the
//! registering caller's responsibility.

use crate::ecs::ComponentStore;
use crate::error::SetupError;
use crate::gfx::RenderTarget;
use crate::input::InputEvent;

/// Outcome of an update pass.
///
/// `GameOver` is the designed simulation-over signal (the ball left the
/// bottom boundary), not an error: it propagates out of
/// [`Scene::update`](crate::scene::Scene::update) so the host can react and
/// tear the scene down instead of the process dying.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    GameOver,
}

/// Runs once before the first frame. A failure here is fatal to the scene.
pub trait SetupSystem {
    fn run(&mut self, store: &mut ComponentStore) -> Result<(), SetupError>;

    /// Release whatever [`run`](Self::run) acquired. Invoked at scene
    /// destruction in reverse registration order — including when setup
    /// failed partway, so implementations must tolerate `run` never having
    /// completed (or having run at all).
    fn teardown(&mut self, _store: &mut ComponentStore) {}
}

/// Runs once per frame, before rendering.
pub trait UpdateSystem {
    fn run(&mut self, store: &mut ComponentStore, dt: f32) -> Tick;
}

/// Runs once per frame, after all updates. Must not mutate components.
pub trait RenderSystem {
    fn run(&mut self, store: &mut ComponentStore, target: &mut dyn RenderTarget);
}

/// Runs once per dispatched input event.
pub trait EventSystem {
    fn run(&mut self, store: &mut ComponentStore, event: &InputEvent);
}

/// Any `FnMut(&mut ComponentStore, f32) -> Tick` is an update system.
impl<F: FnMut(&mut ComponentStore, f32) -> Tick> UpdateSystem for F {
    fn run(&mut self, store: &mut ComponentStore, dt: f32) -> Tick {
        (self)(store, dt)
    }
}

/// Any `FnMut(&mut ComponentStore, &InputEvent)` is an event system.
impl<F: FnMut(&mut ComponentStore, &InputEvent)> EventSystem for F {
    fn run(&mut self, store: &mut ComponentStore, event: &InputEvent) {
        (self)(store, event)
    }
}

/// Ordered lists of systems, one per kind.
pub struct SystemPipeline {
    setup: Vec<Box<dyn SetupSystem>>,
    update: Vec<Box<dyn UpdateSystem>>,
    render: Vec<Box<dyn RenderSystem>>,
    event: Vec<Box<dyn EventSystem>>,
}

impl SystemPipeline {
    pub fn new() -> Self {
        Self {
            setup: Vec::new(),
            update: Vec::new(),
            render: Vec::new(),
            event: Vec::new(),
        }
    }

    pub fn add_setup<S: SetupSystem + 'static>(&mut self, system: S) {
        self.setup.push(Box::new(system));
    }

    pub fn add_update<S: UpdateSystem + 'static>(&mut self, system: S) {
        self.update.push(Box::new(system));
    }

    pub fn add_render<S: RenderSystem + 'static>(&mut self, system: S) {
        self.render.push(Box::new(system));
    }

    pub fn add_event<S: EventSystem + 'static>(&mut self, system: S) {
        self.event.push(Box::new(system));
    }

    /// Run all setup systems in registration order, stopping at the first
    /// failure.
    pub fn run_setup(&mut self, store: &mut ComponentStore) -> Result<(), SetupError> {
        for system in &mut self.setup {
            system.run(store)?;
        }
        Ok(())
    }

    /// Run update systems in registration order. A `GameOver` stops the pass
    /// immediately — later systems do not see the frame.
    pub fn run_update(&mut self, store: &mut ComponentStore, dt: f32) -> Tick {
        for system in &mut self.update {
            if system.run(store, dt) == Tick::GameOver {
                return Tick::GameOver;
            }
        }
        Tick::Continue
    }

    /// Run render systems in registration order.
    pub fn run_render(&mut self, store: &mut ComponentStore, target: &mut dyn RenderTarget) {
        for system in &mut self.render {
            system.run(store, target);
        }
    }

    /// Dispatch one input event to every event system, in registration order.
    pub fn run_event(&mut self, store: &mut ComponentStore, event: &InputEvent) {
        for system in &mut self.event {
            system.run(store, event);
        }
    }

    /// Run every setup system's teardown hook, in reverse registration order.
    pub fn teardown(&mut self, store: &mut ComponentStore) {
        for system in self.setup.iter_mut().rev() {
            system.teardown(store);
        }
    }
}

impl Default for SystemPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        label: &'static str,
        log: Log,
        fail: bool,
    }

    impl Recorder {
        fn new(label: &'static str, log: &Log) -> Self {
            Self {
                label,
                log: Rc::clone(log),
                fail: false,
            }
        }

        fn failing(label: &'static str, log: &Log) -> Self {
            Self {
                fail: true,
                ..Self::new(label, log)
            }
        }
    }

    impl SetupSystem for Recorder {
        fn run(&mut self, _store: &mut ComponentStore) -> Result<(), SetupError> {
            self.log.borrow_mut().push(format!("setup:{}", self.label));
            if self.fail {
                Err(SetupError::Other(format!("{} broke", self.label)))
            } else {
                Ok(())
            }
        }

        fn teardown(&mut self, _store: &mut ComponentStore) {
            self.log.borrow_mut().push(format!("teardown:{}", self.label));
        }
    }

    #[test]
    fn setup_runs_in_registration_order() {
        let log: Log = Rc::default();
        let mut pipeline = SystemPipeline::new();
        pipeline.add_setup(Recorder::new("a", &log));
        pipeline.add_setup(Recorder::new("b", &log));
        pipeline.add_setup(Recorder::new("c", &log));

        let mut store = ComponentStore::new();
        pipeline.run_setup(&mut store).unwrap();
        assert_eq!(*log.borrow(), ["setup:a", "setup:b", "setup:c"]);
    }

    #[test]
    fn teardown_runs_in_reverse_registration_order() {
        let log: Log = Rc::default();
        let mut pipeline = SystemPipeline::new();
        pipeline.add_setup(Recorder::new("a", &log));
        pipeline.add_setup(Recorder::new("b", &log));
        pipeline.add_setup(Recorder::new("c", &log));

        let mut store = ComponentStore::new();
        pipeline.run_setup(&mut store).unwrap();
        log.borrow_mut().clear();

        pipeline.teardown(&mut store);
        assert_eq!(*log.borrow(), ["teardown:c", "teardown:b", "teardown:a"]);
    }

    #[test]
    fn setup_stops_at_first_failure() {
        let log: Log = Rc::default();
        let mut pipeline = SystemPipeline::new();
        pipeline.add_setup(Recorder::new("a", &log));
        pipeline.add_setup(Recorder::failing("b", &log));
        pipeline.add_setup(Recorder::new("c", &log));

        let mut store = ComponentStore::new();
        let err = pipeline.run_setup(&mut store).unwrap_err();
        assert!(matches!(err, SetupError::Other(_)));
        assert_eq!(*log.borrow(), ["setup:a", "setup:b"]);
    }

    #[test]
    fn update_runs_in_order_and_game_over_short_circuits() {
        let log: Log = Rc::default();
        let mut pipeline = SystemPipeline::new();

        let l1 = Rc::clone(&log);
        pipeline.add_update(move |_: &mut ComponentStore, _dt: f32| {
            l1.borrow_mut().push("first".into());
            Tick::Continue
        });
        let l2 = Rc::clone(&log);
        pipeline.add_update(move |_: &mut ComponentStore, _dt: f32| {
            l2.borrow_mut().push("second".into());
            Tick::GameOver
        });
        let l3 = Rc::clone(&log);
        pipeline.add_update(move |_: &mut ComponentStore, _dt: f32| {
            l3.borrow_mut().push("third".into());
            Tick::Continue
        });

        let mut store = ComponentStore::new();
        assert_eq!(pipeline.run_update(&mut store, 1.0), Tick::GameOver);
        assert_eq!(*log.borrow(), ["first", "second"]);
    }

    #[test]
    fn events_reach_every_event_system() {
        use crate::input::{InputEvent, Key};

        let log: Log = Rc::default();
        let mut pipeline = SystemPipeline::new();
        for label in ["x", "y"] {
            let l = Rc::clone(&log);
            pipeline.add_event(move |_: &mut ComponentStore, event: &InputEvent| {
                l.borrow_mut().push(format!("{label}:{event:?}"));
            });
        }

        let mut store = ComponentStore::new();
        pipeline.run_event(&mut store, &InputEvent::KeyDown(Key::Left));
        assert_eq!(
            *log.borrow(),
            ["x:KeyDown(Left)", "y:KeyDown(Left)"]
        );
    }
}
