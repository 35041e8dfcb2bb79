pub mod column_strip;
pub mod pane_chrome;
pub mod scroll_view;
pub mod song_card;
pub mod status_bar;
pub mod toast;
