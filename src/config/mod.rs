//! Configuration Module
//!
//! Client configuration and file loading.

pub mod client;
pub mod loader;

pub use client::{ClientConfig, Resource, ResourcePaths};
pub use loader::ConfigLoader;
