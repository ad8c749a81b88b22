pub mod batch;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod menu;
pub mod output;
pub mod render;
