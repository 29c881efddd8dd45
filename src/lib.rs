// ABOUTME: Library crate for the FylShare terminal client exposing public API for testing and external use

pub mod api;
pub mod app;
pub mod clock;
pub mod components;
pub mod config;
pub mod lifecycle;
pub mod models;
pub mod notification;
