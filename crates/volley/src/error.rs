//! Error types.
//!
//! Three families: configuration errors surface at the call site
//! ([`StoreError`], [`TilemapError`]), resource failures surface out of scene
//! setup and abort it ([`ResourceError`], [`SetupError`], [`SceneError`]),
//! and the simulation-over condition is *not* an error — it is the
//! [`Tick::GameOver`](crate::pipeline::Tick) outcome of an update pass.

use thiserror::Error;

use crate::ecs::Entity;

/// Misuse of the component store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The entity already has a component of this type. Overwriting must go
    /// through the explicit `replace`.
    #[error("entity {entity} already has a `{component}` component")]
    DuplicateComponent {
        entity: Entity,
        component: &'static str,
    },

    /// The entity handle is stale or was never alive.
    #[error("entity {entity} is not alive")]
    DeadEntity { entity: Entity },

    /// The entity name is already taken.
    #[error("entity name `{name}` is already taken by {existing}")]
    DuplicateName { name: String, existing: Entity },
}

/// A tilemap whose cell list does not cover its grid.
#[derive(Debug, Error)]
#[error("tilemap of {width}x{height} cells needs {expected} entries, got {actual}")]
pub struct TilemapError {
    pub width: u32,
    pub height: u32,
    pub expected: usize,
    pub actual: usize,
}

/// Failure reported by the texture collaborator.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("texture `{name}` is not loaded")]
    NotFound { name: String },

    #[error("loading texture `{name}` failed: {reason}")]
    Load { name: String, reason: String },
}

/// Failure of a setup system. Fatal to scene construction.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("texture `{name}` failed to load")]
    Texture {
        name: String,
        #[source]
        source: ResourceError,
    },

    #[error("no `Textures` resource in the store; insert one before setup")]
    MissingTextures,

    #[error("{0}")]
    Other(String),
}

/// Scene lifecycle failure.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A setup system failed; the scene was torn back down and is unusable.
    #[error("scene setup failed")]
    Setup(#[from] SetupError),

    /// `setup` ran twice.
    #[error("scene setup already ran")]
    AlreadySetUp,
}
