// Collaborator contracts the activation controller drives.
use std::time::Duration;

use futures_util::future::LocalBoxFuture;

use super::PlaybackError;

/// Outcome of one play request.
pub type PlayFuture = LocalBoxFuture<'static, Result<(), PlaybackError>>;

/// A user gesture the browser accepts as permission to start audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Click,
    KeyDown,
    TouchStart,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 3] = [Self::Click, Self::KeyDown, Self::TouchStart];

    /// DOM event type the listener is registered for.
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::TouchStart => "touchstart",
        }
    }
}

/// The audio handle being activated.
pub trait MediaSurface {
    fn is_paused(&self) -> bool;

    /// Volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f64);

    /// Issue a play request.
    ///
    /// The request must reach the platform before this returns so that it is
    /// attributed to the current user gesture. The returned future only
    /// reports the outcome.
    fn play(&mut self) -> PlayFuture;
}

/// Document-wide input capture plus the mount point for the activation prompt.
pub trait InteractionSurface {
    fn subscribe(&mut self, kind: InteractionKind);
    fn unsubscribe(&mut self, kind: InteractionKind);
    fn mount_prompt(&mut self);
    /// Start the prompt's exit transition. Removal follows separately.
    fn fade_prompt(&mut self, duration: Duration);
    fn unmount_prompt(&mut self);
}
