//! Library exports for the TinyApp URL shortener
//!
//! This module exposes internal components for testing and potential library usage.

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handler;
pub mod ids;
pub mod middleware;
pub mod model;
pub mod route;
pub mod session;
pub mod view;
