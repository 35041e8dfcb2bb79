//! MidMusic core: feed normalization, home-screen layout and state, and the
//! collaborators the home screen talks to (catalog, playback, network).

pub mod catalog;
pub mod config;
pub mod error;
pub mod feed;
pub mod haptics;
pub mod home;
pub mod layout;
pub mod library;
pub mod network;
pub mod normalize;
pub mod platform;
pub mod playback;
pub mod song;

pub use home::{FeedEvent, FetchAlert, FetchTrigger, HomeController, HomeState};
pub use song::Song;
