//! Playback context: the one place that knows which track is active.
//!
//! Screens receive a `&mut PlaybackContext` instead of reaching for global
//! state. Reads: [`PlaybackContext::active_track_id`] and friends. Writes:
//! [`PlaybackContext::play_audio`], [`PlaybackContext::toggle_pause`],
//! [`PlaybackContext::stop`].

use async_trait::async_trait;
use tracing::{info, warn};

use crate::song::Song;

/// The audio engine behind the context.
#[async_trait]
pub trait PlaybackEngine: Send {
    /// Replace whatever is playing with `song` and start it.
    async fn load(&mut self, song: &Song) -> anyhow::Result<()>;

    async fn set_paused(&mut self, paused: bool) -> anyhow::Result<()>;

    async fn stop(&mut self) -> anyhow::Result<()>;
}

pub struct PlaybackContext {
    engine: Box<dyn PlaybackEngine>,
    active: Option<Song>,
    paused: bool,
}

impl PlaybackContext {
    pub fn new(engine: Box<dyn PlaybackEngine>) -> Self {
        Self {
            engine,
            active: None,
            paused: false,
        }
    }

    pub fn active_track(&self) -> Option<&Song> {
        self.active.as_ref()
    }

    pub fn active_track_id(&self) -> Option<&str> {
        self.active.as_ref().map(|s| s.id.as_str())
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Start `song`. The active track only changes once the engine accepted it.
    pub async fn play_audio(&mut self, song: Song) -> anyhow::Result<()> {
        info!("playback: play {} ({})", song.title, song.id);
        self.engine.load(&song).await?;
        self.active = Some(song);
        self.paused = false;
        Ok(())
    }

    /// No-op when nothing is loaded.
    pub async fn toggle_pause(&mut self) -> anyhow::Result<()> {
        if self.active.is_none() {
            return Ok(());
        }
        let next = !self.paused;
        self.engine.set_paused(next).await?;
        self.paused = next;
        Ok(())
    }

    pub async fn stop(&mut self) -> anyhow::Result<()> {
        if let Err(e) = self.engine.stop().await {
            warn!("playback: stop failed: {}", e);
            return Err(e);
        }
        self.active = None;
        self.paused = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingEngine {
        calls: Arc<Mutex<Vec<String>>>,
        fail_load: bool,
    }

    #[async_trait]
    impl PlaybackEngine for RecordingEngine {
        async fn load(&mut self, song: &Song) -> anyhow::Result<()> {
            if self.fail_load {
                anyhow::bail!("no engine");
            }
            self.calls.lock().unwrap().push(format!("load {}", song.id));
            Ok(())
        }

        async fn set_paused(&mut self, paused: bool) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(format!("paused {paused}"));
            Ok(())
        }

        async fn stop(&mut self) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push("stop".to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn play_sets_active_track() {
        let engine = RecordingEngine::default();
        let calls = engine.calls.clone();
        let mut ctx = PlaybackContext::new(Box::new(engine));

        assert!(ctx.active_track_id().is_none());
        ctx.play_audio(Song::new("a", "A", "x", "u")).await.unwrap();
        assert_eq!(ctx.active_track_id(), Some("a"));

        ctx.toggle_pause().await.unwrap();
        assert!(ctx.is_paused());
        ctx.play_audio(Song::new("b", "B", "x", "u")).await.unwrap();
        assert!(!ctx.is_paused());

        ctx.stop().await.unwrap();
        assert!(ctx.active_track().is_none());
        assert_eq!(
            *calls.lock().unwrap(),
            ["load a", "paused true", "load b", "stop"]
        );
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_track() {
        let mut ctx = PlaybackContext::new(Box::new(RecordingEngine {
            fail_load: true,
            ..Default::default()
        }));
        assert!(ctx.play_audio(Song::new("a", "A", "x", "u")).await.is_err());
        assert!(ctx.active_track().is_none());
    }

    #[tokio::test]
    async fn pause_without_track_is_noop() {
        let engine = RecordingEngine::default();
        let calls = engine.calls.clone();
        let mut ctx = PlaybackContext::new(Box::new(engine));
        ctx.toggle_pause().await.unwrap();
        assert!(!ctx.is_paused());
        assert!(calls.lock().unwrap().is_empty());
    }
}
