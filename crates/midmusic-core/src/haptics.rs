//! Press feedback collaborator.

/// Intensity variant for a feedback pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HapticKind {
    /// Ordinary press.
    #[default]
    Light,
    /// Sustained press that opened a contextual surface.
    LongPress,
}

/// Fire-and-forget feedback. Implementations must not block or fail.
pub trait Haptics: Send + Sync {
    fn trigger(&self, kind: HapticKind);
}

/// Feedback that does nothing.
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn trigger(&self, _kind: HapticKind) {}
}
