// Library surface for headless/integration tests and reuse.
// The binary only adds the CLI and terminal setup on top.
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod config;
pub mod draw;
pub mod error;
pub mod game;
pub mod logging;
pub mod runtime;
pub mod ui;

pub use error::{Error, Result};
