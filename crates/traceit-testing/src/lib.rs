//! Testing infrastructure for traceit integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: Fluent interface for declarative test setup
//! - `MockCampus`: In-process HTTP mock of the lost & found backend

pub mod server;
pub mod world;

pub use server::MockCampus;
pub use world::{TestWorld, ADMIN_EMAIL, ADMIN_PASSWORD};
