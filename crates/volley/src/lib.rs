//! # Volley — Minimal ECS Runtime for 2D Arcade Simulations
//!
//! A single-threaded entity-component store, a four-stage system pipeline
//! (setup / update / render / event), and the gameplay systems of a
//! Pong-style simulation: velocity integration with boundary bounce, AABB
//! collision detection and response, and wall-clock sprite animation.
//!
//! The window loop, texture decoding, and drawing primitives belong to the
//! host application and are consumed through the narrow traits in [`gfx`].
//! Start with `use volley::prelude::*`, build a [`Scene`](scene::Scene), and
//! drive it from your frame loop — `examples/pong.rs` shows the whole
//! round trip.

pub mod components;
pub mod ecs;
pub mod error;
pub mod gfx;
pub mod input;
pub mod pipeline;
pub mod prelude;
pub mod scene;
pub mod systems;
pub mod tilemap;
pub mod time;
