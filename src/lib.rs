pub mod appearance;
pub mod commands;
pub mod config;
pub mod fixtures;
pub mod motion;
pub mod settings;
pub mod storage;
pub mod store;
pub mod tui;
pub mod validate;
