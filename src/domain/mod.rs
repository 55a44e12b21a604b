//! Domain layer - Core business logic
//!
//! This module contains the core domain entities, repository traits,
//! and domain services. Nothing here depends on the application or
//! infrastructure layers.

pub mod entities;
pub mod repositories;
pub mod services;
