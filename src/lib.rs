pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod horizon;
pub mod i18n;
pub mod logging;
pub mod modal;
pub mod models;
pub mod screen;
pub mod storage;
pub mod tui;
