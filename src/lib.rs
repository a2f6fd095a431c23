pub mod cli;
pub mod commands;
pub mod config;
pub mod extract;
pub mod logging;
pub mod workbook;
