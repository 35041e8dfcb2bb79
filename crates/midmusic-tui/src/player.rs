//! Playback actor. Owns the `PlaybackContext` so engine calls (which may spawn
//! mpv) never block the UI loop; reports every outcome back as a
//! `PlayerUpdate`.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use midmusic_core::playback::PlaybackContext;
use midmusic_core::song::Song;

use crate::mpv::MpvEvent;

#[derive(Debug)]
pub enum PlayerCommand {
    Play(Song),
    TogglePause,
    Stop,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerUpdate {
    Started(Song),
    Paused(bool),
    Stopped,
    Failed(String),
}

/// Run the actor until every command sender is gone.
pub fn spawn_player<T>(
    mut ctx: PlaybackContext,
    mut engine_events: mpsc::Receiver<MpvEvent>,
    tx: mpsc::Sender<T>,
) -> mpsc::Sender<PlayerCommand>
where
    T: From<PlayerUpdate> + Send + 'static,
{
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<PlayerCommand>(32);
    tokio::spawn(async move {
        // Loads sent to the engine whose `start-file` has not arrived yet. mpv
        // reports events in order, so an end-of-file seen while this is
        // non-zero belongs to a track that was already replaced.
        let mut pending_starts = 0usize;
        loop {
            let update = tokio::select! {
                cmd = cmd_rx.recv() => match cmd {
                    Some(cmd) => {
                        let update = run_command(&mut ctx, cmd).await;
                        if matches!(update, PlayerUpdate::Started(_)) {
                            pending_starts += 1;
                        }
                        update
                    }
                    None => break,
                },
                Some(event) = engine_events.recv() => {
                    if event.is_start_of_file() {
                        pending_starts = pending_starts.saturating_sub(1);
                        continue;
                    }
                    if !event.is_end_of_file() || ctx.active_track().is_none() {
                        continue;
                    }
                    if pending_starts > 0 {
                        debug!("player: ignoring end of a replaced track");
                        continue;
                    }
                    debug!("player: track finished");
                    match ctx.stop().await {
                        Ok(()) => PlayerUpdate::Stopped,
                        Err(e) => PlayerUpdate::Failed(e.to_string()),
                    }
                }
            };
            if tx.send(update.into()).await.is_err() {
                break;
            }
        }
        debug!("player: exiting");
    });
    cmd_tx
}

async fn run_command(ctx: &mut PlaybackContext, cmd: PlayerCommand) -> PlayerUpdate {
    let result = match cmd {
        PlayerCommand::Play(song) => {
            let started = song.clone();
            ctx.play_audio(song)
                .await
                .map(|()| PlayerUpdate::Started(started))
        }
        PlayerCommand::TogglePause => ctx
            .toggle_pause()
            .await
            .map(|()| PlayerUpdate::Paused(ctx.is_paused())),
        PlayerCommand::Stop => ctx.stop().await.map(|()| PlayerUpdate::Stopped),
    };
    result.unwrap_or_else(|e| {
        warn!("player: {}", e);
        PlayerUpdate::Failed(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use midmusic_core::playback::PlaybackEngine;
    use serde_json::json;

    struct FakeEngine;

    #[async_trait]
    impl PlaybackEngine for FakeEngine {
        async fn load(&mut self, song: &Song) -> anyhow::Result<()> {
            if song.id == "broken" {
                anyhow::bail!("cannot open");
            }
            Ok(())
        }

        async fn set_paused(&mut self, _paused: bool) -> anyhow::Result<()> {
            Ok(())
        }

        async fn stop(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn commands_report_updates() {
        let (_event_tx, event_rx) = mpsc::channel(4);
        let (tx, mut rx) = mpsc::channel::<PlayerUpdate>(8);
        let player = spawn_player(PlaybackContext::new(Box::new(FakeEngine)), event_rx, tx);

        let song = Song::new("a", "A", "x", "u");
        player.send(PlayerCommand::Play(song.clone())).await.unwrap();
        assert_eq!(rx.recv().await, Some(PlayerUpdate::Started(song)));

        player.send(PlayerCommand::TogglePause).await.unwrap();
        assert_eq!(rx.recv().await, Some(PlayerUpdate::Paused(true)));

        player
            .send(PlayerCommand::Play(Song::new("broken", "B", "x", "u")))
            .await
            .unwrap();
        assert!(matches!(rx.recv().await, Some(PlayerUpdate::Failed(_))));

        player.send(PlayerCommand::Stop).await.unwrap();
        assert_eq!(rx.recv().await, Some(PlayerUpdate::Stopped));
    }

    #[tokio::test]
    async fn end_of_replaced_track_keeps_new_one_playing() {
        let (event_tx, event_rx) = mpsc::channel(4);
        let (tx, mut rx) = mpsc::channel::<PlayerUpdate>(8);
        let player = spawn_player(PlaybackContext::new(Box::new(FakeEngine)), event_rx, tx);

        player
            .send(PlayerCommand::Play(Song::new("a", "A", "x", "u")))
            .await
            .unwrap();
        rx.recv().await;
        event_tx
            .send(MpvEvent { raw: json!({"event": "start-file"}) })
            .await
            .unwrap();

        // "a" finishes just as "b" is loaded; its end-file arrives late.
        let b = Song::new("b", "B", "x", "u");
        player.send(PlayerCommand::Play(b.clone())).await.unwrap();
        assert_eq!(rx.recv().await, Some(PlayerUpdate::Started(b)));
        event_tx
            .send(MpvEvent { raw: json!({"event": "end-file", "reason": "eof"}) })
            .await
            .unwrap();
        event_tx
            .send(MpvEvent { raw: json!({"event": "start-file"}) })
            .await
            .unwrap();

        let quiet = tokio::time::timeout(std::time::Duration::from_millis(200), rx.recv()).await;
        assert!(quiet.is_err(), "late end-file stopped the new track");

        // Now "b" itself ends.
        event_tx
            .send(MpvEvent { raw: json!({"event": "end-file", "reason": "eof"}) })
            .await
            .unwrap();
        assert_eq!(rx.recv().await, Some(PlayerUpdate::Stopped));
    }

    #[tokio::test]
    async fn end_of_file_stops_active_track() {
        let (event_tx, event_rx) = mpsc::channel(4);
        let (tx, mut rx) = mpsc::channel::<PlayerUpdate>(8);
        let player = spawn_player(PlaybackContext::new(Box::new(FakeEngine)), event_rx, tx);

        player
            .send(PlayerCommand::Play(Song::new("a", "A", "x", "u")))
            .await
            .unwrap();
        rx.recv().await;

        event_tx
            .send(MpvEvent { raw: json!({"event": "start-file"}) })
            .await
            .unwrap();
        event_tx
            .send(MpvEvent { raw: json!({"event": "end-file", "reason": "eof"}) })
            .await
            .unwrap();
        assert_eq!(rx.recv().await, Some(PlayerUpdate::Stopped));
    }
}
