//! Press feedback for a terminal: the bell, when enabled.

use std::io::Write;

use tracing::trace;

use midmusic_core::haptics::{HapticKind, Haptics, NoHaptics};

pub struct TerminalHaptics;

fn bell_for(kind: HapticKind) -> &'static str {
    match kind {
        HapticKind::Light => "\x07",
        HapticKind::LongPress => "\x07\x07",
    }
}

impl Haptics for TerminalHaptics {
    fn trigger(&self, kind: HapticKind) {
        trace!("haptics: {:?}", kind);
        let mut out = std::io::stdout();
        let _ = out.write_all(bell_for(kind).as_bytes());
        let _ = out.flush();
    }
}

/// The bell when `enabled`, silence otherwise.
pub fn from_config(enabled: bool) -> Box<dyn Haptics> {
    if enabled {
        Box::new(TerminalHaptics)
    } else {
        Box::new(NoHaptics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_press_rings_twice() {
        assert_eq!(bell_for(HapticKind::Light), "\x07");
        assert_eq!(bell_for(HapticKind::LongPress), "\x07\x07");
    }

    #[test]
    fn disabled_feedback_is_silent() {
        // Must not write to stdout or panic.
        from_config(false).trigger(HapticKind::LongPress);
    }
}
