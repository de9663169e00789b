//! Terminal front end: stdin/stdout prompts, JSON save files and timestamped
//! game logs on disk, and the top-level menu.

pub mod app;
pub mod config;
pub mod game_log;
pub mod saves;
pub mod terminal;

pub use app::{run, AppError};
pub use config::Config;
