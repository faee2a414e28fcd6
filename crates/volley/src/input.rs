//! Input events.
//!
//! The host's event loop translates whatever windowing backend it uses into
//! [`InputEvent`] values and feeds them to the scene's event systems. The
//! core only ever pattern-matches on them.

/// Key codes the gameplay systems care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Escape,
    /// Any key the core has no name for; the raw backend code.
    Other(u32),
}

/// A single input event as dispatched by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
}
