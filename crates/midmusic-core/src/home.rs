//! Home screen controller.
//!
//! # States
//! ```text
//!  Initializing  nothing mounted yet
//!  Loading       first fetch cycle in flight (full-screen spinner)
//!  Ready         sections shown
//!  Refreshing    sections shown, pull-to-refresh spinner
//!  Offline       reachability says no; overrides every other state
//! ```
//!
//! A fetch cycle runs quick picks to completion before trending starts. Each
//! section fails on its own: the failed list is emptied and one alert is
//! raised. Every cycle carries a generation number and only the newest
//! cycle's results are applied; older in-flight cycles are left to finish and
//! their results are dropped.

use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::catalog::CatalogClient;
use crate::error::CatalogError;
use crate::network::Reachability;
use crate::normalize::{normalize_section, SectionKind};
use crate::song::Song;

/// Scroll offset past which the header divider is drawn.
pub const DIVIDER_SCROLL_THRESHOLD: u16 = 5;

pub const FETCH_ERROR_ALERT: &str =
    "An error occurred while fetching the home feed. Please try again.";

pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeState {
    Initializing,
    Loading,
    Ready,
    Refreshing,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTrigger {
    Mount,
    Refresh,
}

/// Progress of one fetch cycle, sent back to the UI loop.
#[derive(Debug)]
pub enum FeedEvent {
    Section {
        generation: Generation,
        kind: SectionKind,
        outcome: Result<Vec<Song>, CatalogError>,
    },
    Done {
        generation: Generation,
    },
}

/// A section fetch failed; show `message` to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchAlert {
    pub kind: SectionKind,
    pub message: &'static str,
    pub detail: String,
}

#[derive(Debug, Default)]
pub struct HomeController {
    quick_picks: Vec<Song>,
    trending: Vec<Song>,
    mounted: bool,
    loading: bool,
    refreshing: bool,
    reachability: Reachability,
    generation: Generation,
    scroll_offset: u16,
}

impl HomeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered state. Offline wins over everything else.
    pub fn state(&self) -> HomeState {
        if self.reachability.is_unreachable() {
            HomeState::Offline
        } else if self.loading {
            HomeState::Loading
        } else if self.refreshing {
            HomeState::Refreshing
        } else if !self.mounted {
            HomeState::Initializing
        } else {
            HomeState::Ready
        }
    }

    pub fn quick_picks(&self) -> &[Song] {
        &self.quick_picks
    }

    pub fn trending(&self) -> &[Song] {
        &self.trending
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn reachability(&self) -> Reachability {
        self.reachability
    }

    /// Generation of the newest cycle started so far.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Begin a fetch cycle and return its generation.
    pub fn start(&mut self, trigger: FetchTrigger) -> Generation {
        self.generation += 1;
        match trigger {
            FetchTrigger::Mount => {
                self.mounted = true;
                self.loading = true;
            }
            FetchTrigger::Refresh => self.refreshing = true,
        }
        debug!("home: start {:?} cycle #{}", trigger, self.generation);
        self.generation
    }

    /// Pull-to-refresh is only offered while the sections are on screen.
    pub fn request_refresh(&mut self) -> Option<Generation> {
        match self.state() {
            HomeState::Ready | HomeState::Refreshing => Some(self.start(FetchTrigger::Refresh)),
            _ => None,
        }
    }

    /// Apply a cycle event. Returns an alert when a current section failed.
    pub fn apply(&mut self, event: FeedEvent) -> Option<FetchAlert> {
        match event {
            FeedEvent::Section {
                generation,
                kind,
                outcome,
            } => {
                if generation != self.generation {
                    debug!(
                        "home: dropping {:?} from stale cycle #{} (latest #{})",
                        kind, generation, self.generation
                    );
                    return None;
                }
                let (slot, alert) = match outcome {
                    Ok(songs) => (songs, None),
                    Err(e) => {
                        error!("{} fetch error: {}", kind.heading(), e);
                        (
                            Vec::new(),
                            Some(FetchAlert {
                                kind,
                                message: FETCH_ERROR_ALERT,
                                detail: e.to_string(),
                            }),
                        )
                    }
                };
                match kind {
                    SectionKind::QuickPicks => self.quick_picks = slot,
                    SectionKind::Trending => self.trending = slot,
                }
                alert
            }
            FeedEvent::Done { generation } => {
                if generation == self.generation {
                    self.loading = false;
                    self.refreshing = false;
                    debug!(
                        "home: cycle #{} done ({} quick picks, {} trending)",
                        generation,
                        self.quick_picks.len(),
                        self.trending.len()
                    );
                }
                None
            }
        }
    }

    /// Returns `true` when the rendered state may have changed.
    pub fn set_reachability(&mut self, reachability: Reachability) -> bool {
        let changed = self.reachability != reachability;
        self.reachability = reachability;
        changed
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    /// Record the vertical scroll offset; returns whether the divider toggled.
    pub fn on_scroll(&mut self, offset: u16) -> bool {
        let before = self.show_divider();
        self.scroll_offset = offset;
        before != self.show_divider()
    }

    pub fn show_divider(&self) -> bool {
        self.scroll_offset > DIVIDER_SCROLL_THRESHOLD
    }
}

// ── Fetching ──────────────────────────────────────────────────────────────────

/// Fetch one section's feed and normalize it.
pub async fn fetch_section(
    client: &dyn CatalogClient,
    kind: SectionKind,
) -> Result<Vec<Song>, CatalogError> {
    let feed = match kind {
        SectionKind::QuickPicks => client.home_feed().await?,
        SectionKind::Trending => client.explore().await?,
    };
    Ok(normalize_section(&feed, kind.label()))
}

/// Run one cycle: quick picks, then trending, then `Done`.
///
/// Stops early only if the receiver is gone.
pub async fn run_fetch_cycle<T>(
    client: &dyn CatalogClient,
    generation: Generation,
    tx: &mpsc::Sender<T>,
) where
    T: From<FeedEvent> + Send,
{
    for kind in [SectionKind::QuickPicks, SectionKind::Trending] {
        let outcome = fetch_section(client, kind).await;
        let event = FeedEvent::Section {
            generation,
            kind,
            outcome,
        };
        if tx.send(event.into()).await.is_err() {
            return;
        }
    }
    let _ = tx.send(FeedEvent::Done { generation }.into()).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn songs(n: usize) -> Vec<Song> {
        (0..n)
            .map(|i| Song::new(format!("s{i}"), "t", "a", "u"))
            .collect()
    }

    fn section(generation: Generation, kind: SectionKind, n: usize) -> FeedEvent {
        FeedEvent::Section {
            generation,
            kind,
            outcome: Ok(songs(n)),
        }
    }

    #[test]
    fn mount_cycle_reaches_ready() {
        let mut home = HomeController::new();
        assert_eq!(home.state(), HomeState::Initializing);

        let g = home.start(FetchTrigger::Mount);
        assert_eq!(home.state(), HomeState::Loading);
        assert!(home.apply(section(g, SectionKind::QuickPicks, 3)).is_none());
        assert!(home.apply(section(g, SectionKind::Trending, 5)).is_none());
        assert_eq!(home.state(), HomeState::Loading);
        home.apply(FeedEvent::Done { generation: g });

        assert_eq!(home.state(), HomeState::Ready);
        assert_eq!(home.quick_picks().len(), 3);
        assert_eq!(home.trending().len(), 5);
    }

    #[test]
    fn failed_sections_are_emptied_and_alerted() {
        let mut home = HomeController::new();
        let g = home.start(FetchTrigger::Mount);
        home.apply(section(g, SectionKind::QuickPicks, 2));
        home.apply(FeedEvent::Done { generation: g });

        let g = home.request_refresh().unwrap();
        let a = home.apply(FeedEvent::Section {
            generation: g,
            kind: SectionKind::QuickPicks,
            outcome: Err(CatalogError::Status(500)),
        });
        let b = home.apply(FeedEvent::Section {
            generation: g,
            kind: SectionKind::Trending,
            outcome: Err(CatalogError::Malformed("x".into())),
        });
        home.apply(FeedEvent::Done { generation: g });

        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a.kind, SectionKind::QuickPicks);
        assert_eq!(b.kind, SectionKind::Trending);
        assert_eq!(a.message, FETCH_ERROR_ALERT);
        assert!(home.quick_picks().is_empty());
        assert!(home.trending().is_empty());
        assert_eq!(home.state(), HomeState::Ready);
    }

    #[test]
    fn offline_overrides_ready_and_loading() {
        let mut home = HomeController::new();
        let g = home.start(FetchTrigger::Mount);
        assert!(home.set_reachability(Reachability::Unreachable));
        assert_eq!(home.state(), HomeState::Offline);

        home.apply(section(g, SectionKind::QuickPicks, 1));
        home.apply(FeedEvent::Done { generation: g });
        assert_eq!(home.state(), HomeState::Offline);

        assert!(home.set_reachability(Reachability::Reachable));
        assert_eq!(home.state(), HomeState::Ready);
        assert!(!home.set_reachability(Reachability::Reachable));

        home.set_reachability(Reachability::Unknown);
        assert_eq!(home.state(), HomeState::Ready);
    }

    #[test]
    fn refresh_is_distinct_from_loading() {
        let mut home = HomeController::new();
        assert!(home.request_refresh().is_none());

        let g = home.start(FetchTrigger::Mount);
        assert!(home.request_refresh().is_none());
        home.apply(FeedEvent::Done { generation: g });

        home.request_refresh().unwrap();
        assert_eq!(home.state(), HomeState::Refreshing);
        assert!(home.is_refreshing());
        assert!(!home.is_loading());
    }

    #[test]
    fn newest_refresh_wins() {
        let mut home = HomeController::new();
        let g0 = home.start(FetchTrigger::Mount);
        home.apply(FeedEvent::Done { generation: g0 });

        let g1 = home.request_refresh().unwrap();
        let g2 = home.request_refresh().unwrap();
        assert!(g2 > g1);

        home.apply(section(g2, SectionKind::QuickPicks, 4));
        // The older cycle finishes late; its data and completion are ignored.
        home.apply(section(g1, SectionKind::QuickPicks, 9));
        home.apply(FeedEvent::Done { generation: g1 });
        assert_eq!(home.quick_picks().len(), 4);
        assert_eq!(home.state(), HomeState::Refreshing);

        home.apply(FeedEvent::Done { generation: g2 });
        assert_eq!(home.state(), HomeState::Ready);
    }

    #[test]
    fn divider_follows_scroll_threshold() {
        let mut home = HomeController::new();
        assert!(!home.show_divider());
        assert!(!home.on_scroll(DIVIDER_SCROLL_THRESHOLD));
        assert!(home.on_scroll(DIVIDER_SCROLL_THRESHOLD + 1));
        assert!(home.show_divider());
        assert!(!home.on_scroll(40));
        assert!(home.on_scroll(0));
        assert!(!home.show_divider());
    }
}
