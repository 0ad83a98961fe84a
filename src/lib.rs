// Library surface for the game core, headless driving and integration tests.
// The terminal front-end lives in main.rs.
pub mod app_dirs;
pub mod config;
pub mod grid;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod target;
pub mod time_series;
pub mod timer;
pub mod trial;
pub mod ui;
