pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod loader;
pub mod render;
pub mod service;
pub mod session;
pub mod telemetry;
