//! Library entry point for the unused-images CLI.

pub mod ancestry;
pub mod commands;
pub mod config;
pub mod docker;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod shell;
pub mod usage;
pub mod utils;
