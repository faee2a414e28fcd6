//! Gameplay components — plain data, no behavior.
//!
//! Systems own all logic; the one exception is [`Sprite::step_animation`],
//! which keeps the frame-advance arithmetic next to the fields it governs so
//! it can be tested without a clock.

use glam::Vec2;

use crate::gfx::{ClipRect, ColorRemap};

/// World position, top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
}

impl Transform {
    pub fn from_xy(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
        }
    }
}

/// Bounding size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Velocity in world units per `dt` unit. Exactly zero on both axes means
/// "not moving" and the movement system skips the entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed {
    pub velocity: Vec2,
}

impl Speed {
    pub fn new(vx: f32, vy: f32) -> Self {
        Self {
            velocity: Vec2::new(vx, vy),
        }
    }

    pub fn zero() -> Self {
        Self {
            velocity: Vec2::ZERO,
        }
    }
}

/// Per-frame collision signal between the detection and response systems.
///
/// `triggered` is set only by detection and cleared only by the bounce
/// response in the same frame; it must never survive a full pass of its
/// companion system, or the response would double-apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct Collider {
    pub triggered: bool,
    /// Horizontal speed of the last mover that intersected this collider.
    pub transfer_speed: f32,
}

/// Marks an entity as player-controlled.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub move_speed: f32,
}

/// A sprite-sheet frame reference plus its animation state.
///
/// `texture` and the remap's name together select the loaded texture variant;
/// frames are laid out in a uniform grid of `frame_size`-pixel squares, and
/// animation advances `x_index` left-to-right through `animation_frames`
/// columns.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub texture: String,
    pub x_index: u32,
    pub y_index: u32,
    pub frame_size: u32,
    /// Zero disables animation.
    pub animation_frames: u32,
    /// Duration of the full frame cycle, in milliseconds.
    pub animation_duration_ms: f32,
    /// Tick of the last committed frame advance, in the scene's
    /// [`Time::elapsed_ms`](crate::time::Time::elapsed_ms) timebase.
    pub last_update_ms: u64,
    pub remap: Option<ColorRemap>,
}

impl Sprite {
    /// A static (non-animated) sprite showing frame (0, 0).
    pub fn new(texture: &str, frame_size: u32) -> Self {
        Self {
            texture: texture.to_string(),
            x_index: 0,
            y_index: 0,
            frame_size,
            animation_frames: 0,
            animation_duration_ms: 0.0,
            last_update_ms: 0,
            remap: None,
        }
    }

    /// An animated sprite cycling through `animation_frames` columns over
    /// `animation_duration_ms`.
    pub fn animated(
        texture: &str,
        frame_size: u32,
        animation_frames: u32,
        animation_duration_ms: f32,
    ) -> Self {
        Self {
            animation_frames,
            animation_duration_ms,
            ..Self::new(texture, frame_size)
        }
    }

    /// Select a color-remapped variant of the texture.
    pub fn with_remap(mut self, remap: ColorRemap) -> Self {
        self.remap = Some(remap);
        self
    }

    /// The remap half of the texture's composite key.
    pub fn remap_name(&self) -> Option<&str> {
        self.remap.as_ref().map(|r| r.name.as_str())
    }

    /// Advance the animation to `now_ms`, returning how many frames moved.
    ///
    /// Advances by `floor(elapsed / duration * frame_count)` and wraps
    /// `x_index` modulo the frame count. The timestamp only resets when at
    /// least one whole frame passed, so sub-frame elapsed time keeps
    /// accumulating instead of being dropped on every call.
    pub fn step_animation(&mut self, now_ms: u64) -> u32 {
        if self.animation_frames == 0 {
            return 0;
        }
        let elapsed = now_ms.saturating_sub(self.last_update_ms) as f32;
        let frames = (elapsed / self.animation_duration_ms * self.animation_frames as f32) as u32;
        if frames > 0 {
            self.x_index = (self.x_index + frames) % self.animation_frames;
            self.last_update_ms = now_ms;
        }
        frames
    }

    /// Source rectangle of the current frame.
    pub fn clip(&self) -> ClipRect {
        ClipRect {
            x: (self.x_index * self.frame_size) as i32,
            y: (self.y_index * self.frame_size) as i32,
            w: self.frame_size,
            h: self.frame_size,
        }
    }
}
