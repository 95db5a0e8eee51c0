//! Tripdeck Library
//!
//! This library provides the server-driven layout engine behind the tripdeck
//! binaries: layout document models, the pure render pipeline, validation and
//! workspace services, the terminal preview and the optional REST API.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod render;
pub mod services;
pub mod tui;

#[cfg(feature = "web")]
pub mod web;
