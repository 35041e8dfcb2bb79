/// mpv IPC driver with separated reader/writer tasks, and the playback engine
/// built on it.
///
/// Architecture:
///
/// ```text
///   MpvEngine::load()  ── spawns mpv on first use ──►  MpvDriver::spawn_and_connect()
///         │                                                   │
///         │                                                   ├── writer_task  ← MpvRequest via mpsc → socket
///         └── MpvHandle::send(cmd) ─────────────────────────► └── reader_task  ← JSON lines from socket
///                                                                   ├── response (has request_id) → oneshot
///                                                                   └── event                     → event_tx
/// ```
///
/// Platform notes:
/// - Unix:   Unix domain sockets
/// - Windows: Named pipes  \\.\pipe\<name>
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, info, warn};

use midmusic_core::config::PlaybackConfig;
use midmusic_core::platform;
use midmusic_core::playback::PlaybackEngine;
use midmusic_core::song::Song;

#[cfg(unix)]
use tokio::net::UnixStream;

#[cfg(windows)]
use tokio::net::windows::named_pipe::ClientOptions;

// ── global request-id counter ─────────────────────────────────────────────────

static NEXT_REQ_ID: AtomicU64 = AtomicU64::new(1);

type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<anyhow::Result<Value>>>>>;

struct PendingRequest {
    req_id: u64,
    payload: String, // serialised JSON line (already has '\n')
    reply: oneshot::Sender<anyhow::Result<Value>>,
}

/// An mpv event that arrived unsolicited (no request_id).
#[derive(Debug, Clone)]
pub struct MpvEvent {
    pub raw: Value,
}

impl MpvEvent {
    /// e.g. "end-file", "start-file", "file-loaded".
    pub fn event_name(&self) -> Option<&str> {
        self.raw.get("event")?.as_str()
    }

    pub fn is_start_of_file(&self) -> bool {
        self.event_name() == Some("start-file")
    }

    /// True when playback ran to the end of the file.
    pub fn is_end_of_file(&self) -> bool {
        self.event_name() == Some("end-file")
            && self.raw.get("reason").and_then(|r| r.as_str()) == Some("eof")
    }
}

// ── public handle ─────────────────────────────────────────────────────────────

/// Cloneable handle to the mpv writer task.
#[derive(Clone)]
pub struct MpvHandle {
    tx: mpsc::Sender<PendingRequest>,
}

impl MpvHandle {
    pub async fn send(&self, command: Value) -> anyhow::Result<Value> {
        let req_id = NEXT_REQ_ID.fetch_add(1, Ordering::Relaxed);
        let msg = json!({ "command": command, "request_id": req_id });
        let mut raw = serde_json::to_string(&msg)?;
        raw.push('\n');

        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(PendingRequest {
                req_id,
                payload: raw,
                reply: reply_tx,
            })
            .await
            .map_err(|_| anyhow::anyhow!("mpv writer task gone"))?;

        tokio::time::timeout(tokio::time::Duration::from_secs(5), reply_rx)
            .await
            .map_err(|_| anyhow::anyhow!("mpv IPC timeout for req={}", req_id))?
            .map_err(|_| anyhow::anyhow!("mpv reply channel dropped req={}", req_id))?
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    pub async fn loadfile(&self, target: &str) -> anyhow::Result<()> {
        debug!("mpv: loadfile {}", target);
        self.send(json!(["loadfile", target, "replace"])).await?;
        // A paused mpv stays paused across loadfile.
        self.set_pause(false).await
    }

    pub async fn set_pause(&self, paused: bool) -> anyhow::Result<()> {
        self.send(json!(["set_property", "pause", paused])).await?;
        Ok(())
    }

    pub async fn stop(&self) -> anyhow::Result<()> {
        self.send(json!(["stop"])).await?;
        Ok(())
    }
}

// ── driver ────────────────────────────────────────────────────────────────────

/// Owns the mpv child process and its IPC connection.
pub struct MpvDriver {
    pub socket_name: String,
    process: Option<tokio::process::Child>,
    volume: f32,
}

impl MpvDriver {
    pub fn new(volume: f32) -> Self {
        Self {
            socket_name: platform::mpv_socket_name(),
            process: None,
            volume,
        }
    }

    pub fn process_alive(&mut self) -> bool {
        let Some(child) = self.process.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                match status.code() {
                    Some(code) => warn!("mpv process exited with code: {}", code),
                    None => warn!("mpv process terminated by signal"),
                }
                false
            }
            Err(e) => {
                warn!("mpv process_alive check failed: {}", e);
                false
            }
        }
    }

    fn command(&self) -> anyhow::Result<tokio::process::Command> {
        let mpv_binary =
            platform::find_mpv_binary().ok_or_else(|| anyhow::anyhow!("mpv binary not found"))?;
        let vol_arg = format!(
            "--volume={}",
            (self.volume * 100.0).clamp(0.0, 100.0).round() as i64
        );
        let mut cmd = tokio::process::Command::new(mpv_binary);
        cmd.arg("--no-video")
            .arg("--idle=yes")
            .arg(platform::mpv_socket_arg())
            .arg("--quiet")
            .arg(vol_arg)
            .stdout(std::process::Stdio::null())
            .kill_on_drop(true);
        Ok(cmd)
    }

    #[cfg(unix)]
    pub async fn spawn_and_connect(
        &mut self,
        event_tx: mpsc::Sender<MpvEvent>,
    ) -> anyhow::Result<MpvHandle> {
        if let Some(mut p) = self.process.take() {
            let _ = p.kill().await;
        }

        let socket_path = std::path::PathBuf::from(&self.socket_name);
        let _ = tokio::fs::remove_file(&socket_path).await;

        let stderr_path = platform::data_dir().join("mpv-stderr.log");
        let stderr_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&stderr_path)?;
        info!("mpv: spawning, stderr → {:?}", stderr_path);

        let child = self.command()?.stderr(stderr_file).spawn()?;
        info!("mpv: spawned process with pid {:?}", child.id());
        self.process = Some(child);

        for _ in 0..50 {
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            if socket_path.exists() {
                break;
            }
        }
        if !socket_path.exists() {
            anyhow::bail!("mpv IPC socket did not appear");
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

        let stream = UnixStream::connect(&socket_path).await?;
        info!("mpv: connected to IPC socket");
        let (read_half, write_half) = stream.into_split();
        Ok(start_io_tasks(read_half, write_half, event_tx))
    }

    #[cfg(windows)]
    pub async fn spawn_and_connect(
        &mut self,
        event_tx: mpsc::Sender<MpvEvent>,
    ) -> anyhow::Result<MpvHandle> {
        if let Some(mut p) = self.process.take() {
            let _ = p.kill().await;
        }

        info!("mpv: spawning new process");
        let child = self
            .command()?
            .stderr(std::process::Stdio::null())
            .spawn()?;
        self.process = Some(child);

        let pipe_path = format!(r"\\.\pipe\{}", self.socket_name);
        for _ in 0..50 {
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            if let Ok(client) = ClientOptions::new().open(&pipe_path) {
                info!("mpv: connected to named pipe");
                let (read_half, write_half) = tokio::io::split(client);
                return Ok(start_io_tasks(read_half, write_half, event_tx));
            }
        }
        anyhow::bail!("mpv named pipe did not appear")
    }
}

fn start_io_tasks<R, W>(read_half: R, write_half: W, event_tx: mpsc::Sender<MpvEvent>) -> MpvHandle
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
    W: tokio::io::AsyncWrite + Unpin + Send + 'static,
{
    // req_id → reply channel; the writer inserts, the reader resolves.
    let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
    let (cmd_tx, cmd_rx) = mpsc::channel::<PendingRequest>(64);

    tokio::spawn(writer_task(write_half, cmd_rx, pending.clone()));
    tokio::spawn(reader_task(BufReader::new(read_half), pending, event_tx));

    MpvHandle { tx: cmd_tx }
}

// ── reader task ───────────────────────────────────────────────────────────────

async fn reader_task<R>(mut reader: BufReader<R>, pending: PendingMap, event_tx: mpsc::Sender<MpvEvent>)
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                debug!("mpv reader: connection closed");
                let mut map = pending.lock().await;
                for (_, tx) in map.drain() {
                    let _ = tx.send(Err(anyhow::anyhow!("mpv IPC connection closed")));
                }
                break;
            }
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let val: Value = match serde_json::from_str(trimmed) {
                    Ok(v) => v,
                    Err(e) => {
                        debug!("mpv reader: invalid json '{}': {}", trimmed, e);
                        continue;
                    }
                };

                if let Some(req_id) = val.get("request_id").and_then(|v| v.as_u64()) {
                    let mut map = pending.lock().await;
                    if let Some(tx) = map.remove(&req_id) {
                        let result = if val["error"].as_str() == Some("success") {
                            Ok(val)
                        } else {
                            let err = val["error"].as_str().unwrap_or("unknown error").to_string();
                            debug!("mpv reader: response req={} err={}", req_id, err);
                            Err(anyhow::anyhow!("mpv error: {}", err))
                        };
                        let _ = tx.send(result);
                    } else {
                        debug!("mpv reader: response for unknown req={}", req_id);
                    }
                } else {
                    debug!("mpv reader: event {}", trimmed);
                    let _ = event_tx.send(MpvEvent { raw: val }).await;
                }
            }
            Err(e) => {
                warn!("mpv reader: read error: {}", e);
                let mut map = pending.lock().await;
                for (_, tx) in map.drain() {
                    let _ = tx.send(Err(anyhow::anyhow!("mpv IPC read error: {}", e)));
                }
                break;
            }
        }
    }
}

// ── writer task ───────────────────────────────────────────────────────────────

async fn writer_task<W>(mut writer: W, mut rx: mpsc::Receiver<PendingRequest>, pending: PendingMap)
where
    W: tokio::io::AsyncWrite + Unpin,
{
    while let Some(req) = rx.recv().await {
        // Register before writing so the reader can match the reply.
        pending.lock().await.insert(req.req_id, req.reply);
        debug!(
            "mpv writer: send req={} payload={}",
            req.req_id,
            req.payload.trim()
        );
        if let Err(e) = writer.write_all(req.payload.as_bytes()).await {
            warn!("mpv writer: write error: {}", e);
            if let Some(tx) = pending.lock().await.remove(&req.req_id) {
                let _ = tx.send(Err(anyhow::anyhow!("mpv write error: {}", e)));
            }
            break;
        }
    }
    debug!("mpv writer: task exiting");
}

// ── PlaybackEngine ────────────────────────────────────────────────────────────

/// What mpv is asked to open for `song`.
pub fn resolve_target(song: &Song, watch_url_base: &str) -> String {
    match song.local_path() {
        Some(path) => path.display().to_string(),
        None => format!("{}{}", watch_url_base, song.id),
    }
}

/// Playback engine backed by an `mpv --idle` child, spawned on first load.
pub struct MpvEngine {
    driver: MpvDriver,
    handle: Option<MpvHandle>,
    event_tx: mpsc::Sender<MpvEvent>,
    watch_url_base: String,
}

impl MpvEngine {
    /// The receiver yields mpv's unsolicited events (end-file and friends).
    pub fn new(config: &PlaybackConfig) -> (Self, mpsc::Receiver<MpvEvent>) {
        let (event_tx, event_rx) = mpsc::channel(64);
        let engine = Self {
            driver: MpvDriver::new(config.default_volume),
            handle: None,
            event_tx,
            watch_url_base: config.watch_url_base.clone(),
        };
        (engine, event_rx)
    }

    async fn connected(&mut self) -> anyhow::Result<MpvHandle> {
        if let Some(handle) = &self.handle {
            if !handle.is_closed() && self.driver.process_alive() {
                return Ok(handle.clone());
            }
            warn!("mpv: connection lost, respawning");
        }
        let handle = self.driver.spawn_and_connect(self.event_tx.clone()).await?;
        self.handle = Some(handle.clone());
        Ok(handle)
    }
}

#[async_trait]
impl PlaybackEngine for MpvEngine {
    async fn load(&mut self, song: &Song) -> anyhow::Result<()> {
        let target = resolve_target(song, &self.watch_url_base);
        self.connected().await?.loadfile(&target).await
    }

    async fn set_paused(&mut self, paused: bool) -> anyhow::Result<()> {
        match &self.handle {
            Some(handle) => handle.set_pause(paused).await,
            None => Ok(()),
        }
    }

    async fn stop(&mut self) -> anyhow::Result<()> {
        match &self.handle {
            Some(handle) => handle.stop().await,
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn targets_resolve_by_origin() {
        let remote = Song::new("abc123", "t", "a", "u");
        assert_eq!(
            resolve_target(&remote, "https://watch?v="),
            "https://watch?v=abc123"
        );
        let local = Song::local(Path::new("/music/set.mp3"));
        assert_eq!(resolve_target(&local, "https://watch?v="), "/music/set.mp3");
    }

    #[tokio::test]
    async fn replies_and_events_are_routed() {
        let (client, server) = tokio::io::duplex(4096);
        let (read_half, write_half) = tokio::io::split(client);
        let (event_tx, mut event_rx) = mpsc::channel(8);
        let handle = start_io_tasks(read_half, write_half, event_tx);

        // Fake mpv: answer one command, then announce end of file.
        tokio::spawn(async move {
            let (server_read, mut server_write) = tokio::io::split(server);
            let mut lines = BufReader::new(server_read).lines();
            let line = lines.next_line().await.unwrap().unwrap();
            let req: Value = serde_json::from_str(&line).unwrap();
            assert_eq!(req["command"], json!(["get_property", "pause"]));
            let reply = json!({"request_id": req["request_id"], "error": "success", "data": true});
            server_write
                .write_all(format!("{reply}\n{}\n", json!({"event": "end-file", "reason": "eof"})).as_bytes())
                .await
                .unwrap();
            // Keep the pipe open until the client is done.
            let _ = lines.next_line().await;
        });

        let resp = handle.send(json!(["get_property", "pause"])).await.unwrap();
        assert_eq!(resp["data"], json!(true));
        let event = event_rx.recv().await.unwrap();
        assert!(event.is_end_of_file());
    }

    #[tokio::test]
    async fn mpv_errors_fail_the_request() {
        let (client, server) = tokio::io::duplex(4096);
        let (read_half, write_half) = tokio::io::split(client);
        let (event_tx, _event_rx) = mpsc::channel(8);
        let handle = start_io_tasks(read_half, write_half, event_tx);

        tokio::spawn(async move {
            let (server_read, mut server_write) = tokio::io::split(server);
            let mut lines = BufReader::new(server_read).lines();
            let line = lines.next_line().await.unwrap().unwrap();
            let req: Value = serde_json::from_str(&line).unwrap();
            let reply = json!({"request_id": req["request_id"], "error": "property unavailable"});
            server_write
                .write_all(format!("{reply}\n").as_bytes())
                .await
                .unwrap();
            let _ = lines.next_line().await;
        });

        let err = handle.stop().await.unwrap_err();
        assert!(err.to_string().contains("property unavailable"));
    }
}
