//! Persistence adapters backing the repository ports.

mod demo;
mod memory;

pub use demo::{seed_demo_directory, SeedError, DEMO_PASSWORD};
pub use memory::{InMemoryFeedbackRepository, InMemoryUserRepository};
