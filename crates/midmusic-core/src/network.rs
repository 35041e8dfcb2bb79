//! Internet reachability, as a tri-state signal.
//!
//! `ConnectivityMonitor` probes a URL on an interval and publishes changes on
//! a `watch` channel; the UI treats `Unreachable` as a first-class state, not
//! an error.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::NetworkConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reachability {
    /// Not probed yet, or the probe was inconclusive.
    #[default]
    Unknown,
    Reachable,
    Unreachable,
}

impl Reachability {
    pub fn is_unreachable(self) -> bool {
        self == Self::Unreachable
    }
}

impl From<Option<bool>> for Reachability {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Unknown,
            Some(true) => Self::Reachable,
            Some(false) => Self::Unreachable,
        }
    }
}

/// One reachability check. Any HTTP response counts as reachable; connect
/// errors and timeouts count as unreachable.
pub async fn probe(client: &reqwest::Client, url: &str) -> Reachability {
    let reachable = match client.head(url).send().await {
        Ok(resp) => {
            debug!("probe: {} -> {}", url, resp.status());
            Some(true)
        }
        Err(e) if e.is_connect() || e.is_timeout() || e.is_request() => {
            debug!("probe: {} unreachable: {}", url, e);
            Some(false)
        }
        Err(e) => {
            debug!("probe: {} inconclusive: {}", url, e);
            None
        }
    };
    Reachability::from(reachable)
}

pub struct ConnectivityMonitor {
    rx: watch::Receiver<Reachability>,
    task: JoinHandle<()>,
}

impl ConnectivityMonitor {
    /// Start probing in the background.
    pub fn spawn(config: &NetworkConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.probe_timeout_secs.max(1)))
            .build()?;
        let url = config.probe_url.clone();
        let every = Duration::from_secs(config.probe_interval_secs.max(1));

        let (tx, rx) = watch::channel(Reachability::Unknown);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let next = probe(&client, &url).await;
                let changed = tx.send_if_modified(|current| {
                    if *current == next {
                        return false;
                    }
                    *current = next;
                    true
                });
                if changed {
                    info!("network: reachability is now {:?}", next);
                }
                if tx.is_closed() {
                    break;
                }
            }
        });

        Ok(Self { rx, task })
    }

    pub fn subscribe(&self) -> watch::Receiver<Reachability> {
        self.rx.clone()
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_optional_bool() {
        assert_eq!(Reachability::from(None), Reachability::Unknown);
        assert_eq!(Reachability::from(Some(true)), Reachability::Reachable);
        assert_eq!(Reachability::from(Some(false)), Reachability::Unreachable);
        assert!(!Reachability::Unknown.is_unreachable());
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() {
        // Bind then drop a listener so the port is very likely closed.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let result = probe(&client, &format!("http://127.0.0.1:{port}/")).await;
        assert_eq!(result, Reachability::Unreachable);
    }
}
