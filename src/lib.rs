//! ElectroPanel Library
//!
//! This library provides the core of the ElectroPanel designer: the device
//! catalog, the DIN rail layout model with its aggregates, panel file
//! persistence, Markdown export, and the terminal and HTTP front ends.

// Module declarations
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod logging;
pub mod models;
pub mod parser;
pub mod services;
pub mod shortcuts;
pub mod tui;
#[cfg(feature = "web")]
pub mod web;
